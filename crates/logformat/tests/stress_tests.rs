use logformat::{Field, Options, Recorder, Scratch, formats};

#[test]
fn test_long_literal_run() {
    let format = "-".repeat(100_000);
    let mut recorder = Recorder::new();
    logformat::parse(&format, &mut recorder, &Options::default()).unwrap();
    assert_eq!(recorder.events().len(), 100_000);
}

#[test]
fn test_many_directives_with_shared_scratch() {
    let format = formats::NCSA_COMBINED.repeat(1_000);
    let options = Options::default();
    let mut scratch = Scratch::default();

    let mut first = Recorder::new();
    logformat::parse_with_scratch(&format, &mut first, &options, &mut scratch).unwrap();

    let mut second = Recorder::new();
    logformat::parse_with_scratch(&format, &mut second, &options, &mut scratch).unwrap();

    assert_eq!(first.events(), second.events());
    let headers = first
        .events()
        .iter()
        .filter(|e| matches!(e.field, Field::ReqHeader { .. }))
        .count();
    assert_eq!(headers, 2_000);
}

#[test]
fn test_parallel_parses() {
    let handles: Vec<_> = (0..8)
        .map(|i| {
            std::thread::spawn(move || {
                let format = format!("%{{X-{}}}i %200,{}s", i, 300 + i);
                let mut recorder = Recorder::new();
                logformat::parse(&format, &mut recorder, &Options::default()).unwrap();
                recorder.into_events()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let events = handle.join().unwrap();
        assert_eq!(
            events[0].field,
            Field::ReqHeader {
                name: format!("X-{}", i)
            }
        );
        let statuses = events[2].predicate.as_ref().unwrap().statuses().to_vec();
        assert_eq!(statuses, vec![200, 300 + i as u32]);
    }
}

#[test]
fn test_every_prefix_of_a_format_terminates() {
    let format = "%h %!200,304<{X-Id}i %{end:msec_frac}t \\\"%r\\\" %{c}a %^to";
    for end in 0..=format.len() {
        if !format.is_char_boundary(end) {
            continue;
        }
        let prefix = &format[..end];
        if let Err(err) = logformat::parse(prefix, &mut Recorder::new(), &Options::default()) {
            assert!(err.span.start <= err.span.end, "{:?}", prefix);
            assert!(err.span.end <= prefix.len(), "{:?}", prefix);
        }
    }
}
