#![allow(missing_docs)]

use std::sync::Arc;

use udprep::{
    UdPrepError,
    conllu::{CorpusParser, MultiwordPolicy, ParserOptions, Sentence, parse},
    encoders::{SentenceEncoder, SequenceEncoder},
    padding::Padder,
    pipeline::{PipelineOptions, TagMode},
    prediction::{ProbabilityTensor, SequenceTagger, predict_tags, tag_accuracy},
    tags::{TAG_CLASS_COUNT, UniversalTagSpace, UposTag, id_to_tag, tag_to_id},
    vocab::{VocabularyBuilder, load_vocabulary_path, save_vocabulary_path},
};

fn record(
    id: &str,
    form: &str,
    upos: &str,
) -> String {
    format!("{id}\t{form}\t_\t{upos}\t_\t_\t_\t_\t_\t_\n")
}

const TREEBANK: &str = "\
# sent_id = s1
# text = The cat sleeps.
1\tThe\tthe\tDET\tDT\t_\t2\tdet\t_\t_
2\tcat\tcat\tNOUN\tNN\t_\t3\tnsubj\t_\t_
3\tsleeps\tsleep\tVERB\tVBZ\t_\t0\troot\t_\tSpaceAfter=No
4\t.\t.\tPUNCT\t.\t_\t3\tpunct\t_\t_

# sent_id = s2
1-2\tdel\t_\t_\t_\t_\t_\t_\t_\t_
1\tde\tde\tADP\t_\t_\t2\tcase\t_\t_
2\tel\tel\tDET\t_\t_\t3\tdet\t_\t_
3\tperro\tperro\tNOUN\t_\t_\t0\troot\t_\t_
3.1\tes\t_\tAUX\t_\t_\t_\t_\t_\t_

";

#[test]
fn single_sentence_scenario() {
    let text = format!("{}{}\n", record("1", "The", "DET"), record("2", "cat", "NOUN"));
    let (corpus, stats) = parse(&text, 128).unwrap();

    assert_eq!(corpus.sentences(), &[Sentence::from_iter([("The", "DET"), ("cat", "NOUN")])]);
    assert_eq!(stats.kept_sentences, 1);
    assert_eq!(tag_to_id("DET").unwrap(), 6);
    assert_eq!(tag_to_id("NOUN").unwrap(), 8);
}

#[test]
fn multiword_and_empty_nodes_are_excluded() {
    let text: String = ["1", "2", "19-20", "1-2", "10.1"]
        .iter()
        .map(|id| record(id, &format!("w{id}"), "NOUN"))
        .collect();
    let (corpus, stats) = parse(&text, 128).unwrap();

    assert_eq!(corpus.len(), 1);
    assert_eq!(
        corpus.sentences()[0].forms().collect::<Vec<_>>(),
        vec!["w1", "w2"]
    );
    assert_eq!(stats.removed_multiword_count, 2);
    assert_eq!(stats.removed_empty_nodes, 1);
}

#[test]
fn long_sentences_are_dropped_whole() {
    let long: String = (1..=129).map(|i| record(&i.to_string(), "w", "X")).collect();
    let short: String = (1..=128).map(|i| record(&i.to_string(), "w", "X")).collect();
    let text = format!("{long}\n{short}\n");

    let (corpus, stats) = parse(&text, 128).unwrap();
    assert_eq!(corpus.len(), 1);
    assert_eq!(corpus.sentences()[0].len(), 128);
    assert_eq!(stats.removed_long_sentences, 1);
    assert_eq!(stats.total_sentences_processed, 2);
    assert!(corpus.iter().all(|s| (1..=128).contains(&s.len())));
}

#[test]
fn reparse_is_idempotent() {
    let parser = ParserOptions::default()
        .with_multiword_policy(MultiwordPolicy::Lenient)
        .build();
    let first = parser.parse_str(TREEBANK).unwrap();
    let second = parser.parse_str(TREEBANK).unwrap();
    assert_eq!(first, second);
}

#[test]
fn universal_tags_round_trip() {
    for tag in UposTag::universal() {
        assert_eq!(id_to_tag(tag_to_id(tag.as_str()).unwrap()).unwrap(), tag.as_str());
    }
}

#[test]
fn padding_scenario() {
    let padded = Padder::new(5).pad(&[vec![5u32, 9, 2]]);
    assert_eq!(padded.matrix.row(0), &[5, 9, 2, 0, 0]);
    assert_eq!(padded.true_lengths, vec![3]);
    assert_eq!(
        Padder::unpad(&padded.matrix, &padded.true_lengths).unwrap(),
        vec![vec![5, 9, 2]]
    );
}

#[test]
fn encode_pad_predict_decode() {
    let (corpus, _) = CorpusParser::default().parse_str(TREEBANK).unwrap();
    assert_eq!(corpus.len(), 2);

    let vocab = VocabularyBuilder::default().fit::<u32, _>(&corpus).unwrap();
    let encoder = SequenceEncoder::new(Arc::new(vocab), Arc::new(UniversalTagSpace::strict()));

    let encoded = encoder.encode_batch(corpus.sentences()).unwrap();
    for (sentence, enc) in corpus.iter().zip(&encoded) {
        assert_eq!(&encoder.decode_encoded(enc).unwrap(), sentence);
    }

    let batch = Padder::new(6).pad_encoded(&encoded);

    /// Scores the gold tag of every position; a perfect model.
    struct Oracle(udprep::padding::PaddedMatrix<u32>);

    impl SequenceTagger<u32> for Oracle {
        fn predict(
            &self,
            tokens: &udprep::padding::PaddedMatrix<u32>,
        ) -> udprep::UPResult<ProbabilityTensor> {
            let mut data = vec![0.0; tokens.rows() * tokens.cols() * TAG_CLASS_COUNT];
            for (i, &tag) in self.0.as_slice().iter().enumerate() {
                data[i * TAG_CLASS_COUNT + tag as usize] = 1.0;
            }
            ProbabilityTensor::new(data, [tokens.rows(), tokens.cols(), TAG_CLASS_COUNT])
        }
    }

    let model = Oracle(batch.tags.clone());
    let predicted = predict_tags(&model, &encoder, &batch).unwrap();
    assert_eq!(
        predicted,
        vec![
            vec!["DET", "NOUN", "VERB", "PUNCT"],
            vec!["ADP", "DET", "NOUN"],
        ]
    );

    let scores = model.predict(&batch.tokens).unwrap();
    let ids = scores.argmax(&batch.true_lengths).unwrap();
    let acc = tag_accuracy(&batch.tags, &ids, &batch.true_lengths).unwrap();
    assert_eq!((acc.correct, acc.total), (7, 7));
}

#[test]
fn out_of_range_ids_are_errors() {
    let (corpus, _) = CorpusParser::default().parse_str(TREEBANK).unwrap();
    let vocab = VocabularyBuilder::default().fit::<u32, _>(&corpus).unwrap();
    let max = vocab.vocab_size() as u32;
    let encoder = SequenceEncoder::new(Arc::new(vocab), Arc::new(UniversalTagSpace::new()));

    assert!(encoder.decode(&[max], &[6], 1).is_ok());
    assert!(matches!(
        encoder.decode(&[max + 1], &[6], 1),
        Err(UdPrepError::OutOfRange { .. })
    ));
    assert!(matches!(
        encoder.decode(&[1], &[TAG_CLASS_COUNT as u32], 1),
        Err(UdPrepError::OutOfRange { .. })
    ));
}

#[test]
fn pipeline_with_saved_vocabulary() {
    tempdir::TempDir::new("udprep_scenarios")
        .and_then(|dir| {
            let train = dir.path().join("train.conllu");
            let test = dir.path().join("test.conllu");
            std::fs::write(&train, TREEBANK)?;
            std::fs::write(
                &test,
                format!("{}{}\n", record("1", "The", "DET"), record("2", "dog", "NOUN")),
            )?;

            let dataset = PipelineOptions::default()
                .with_tag_mode(TagMode::Strict)
                .with_max_len(8)
                .build()
                .prepare_splits::<u32, _>(&train, None, Some(&test))
                .unwrap();

            let test_split = dataset.test.as_ref().unwrap();
            assert_eq!(test_split.batch.tokens.row(0)[..2], [1, dataset.encoder.vocab().oov_id()]);
            assert_eq!(test_split.summary.oov_tokens, 1);

            let vocab_path = dir.path().join("vocab.txt");
            save_vocabulary_path(dataset.encoder.vocab().as_ref(), &vocab_path).unwrap();
            let reloaded = load_vocabulary_path::<u32, _>(&vocab_path).unwrap();
            assert_eq!(&reloaded, dataset.encoder.vocab().as_ref());
            Ok(())
        })
        .unwrap();
}
