use logformat::{Error, ErrorKind, Options, Recorder, Scratch, Span};

fn error(format: &str) -> Error {
    logformat::parse(format, &mut Recorder::new(), &Options::default())
        .expect_err("format should fail")
}

/// Asserts the kind and the exact text the span covers.
fn check(format: &str, kind: ErrorKind, snippet: &str) {
    let err = error(format);
    assert_eq!(err.kind, kind, "kind for {:?}", format);
    assert_eq!(err.snippet(format), snippet, "span for {:?}", format);
}

#[test]
fn test_brace_errors() {
    check("%h %{Referer", ErrorKind::MissingClosingBrace, "{");
    check("ab%{}i", ErrorKind::EmptyName, "{}");
    check("%{x}a", ErrorKind::UnrecognisedIpType, "x");
    check("%{bogus}p", ErrorKind::UnrecognisedPortType, "bogus");
    check("%{ppid}P", ErrorKind::UnrecognisedIdType, "ppid");
    check("%{ns}T", ErrorKind::UnrecognisedRtimeUnit, "ns");
}

#[test]
fn test_directive_shape_errors() {
    check("%h %Z", ErrorKind::UnrecognisedDirective, "%Z");
    check("%200<Z", ErrorKind::UnrecognisedDirective, "%200<Z");
    check("%^x", ErrorKind::UnrecognisedDirective, "%^x");
    check("%{n}^tq", ErrorKind::UnrecognisedDirective, "%{n}^tq");
    check("%^", ErrorKind::UnrecognisedDirective, "%^");
    check("x%é", ErrorKind::UnrecognisedDirective, "%é");
    check("%i", ErrorKind::MissingName, "%i");
    check("%!200^ti", ErrorKind::MissingName, "%!200^ti");
    check("%{x}s", ErrorKind::UnwantedName, "%{x}s");
    check("abc %", ErrorKind::MissingDirective, "%");
    check("%!404>{x}", ErrorKind::MissingDirective, "%!404>{x}");
}

#[test]
fn test_escape_errors() {
    check("abc\\", ErrorKind::MissingEscape, "\\");
    check("a\\x", ErrorKind::UnrecognisedEscape, "\\x");
    check("a\\é", ErrorKind::UnrecognisedEscape, "\\é");
}

#[test]
fn test_status_errors() {
    check("%200,70000s", ErrorKind::StatusOverflow, "70000");
    check("%<>s", ErrorKind::TooManyRedirectFlags, "<>");
    check("%!500><s", ErrorKind::TooManyRedirectFlags, "><");
}

#[test]
fn test_too_many_statuses() {
    let ok: Vec<String> = (1..=128).map(|s| s.to_string()).collect();
    let format = format!("%{}s", ok.join(","));
    assert!(logformat::parse(&format, &mut Recorder::new(), &Options::default()).is_ok());

    let over: Vec<String> = (1..=129).map(|s| s.to_string()).collect();
    let list = over.join(",");
    let format = format!("x%{}s", list);
    let err = error(&format);
    assert_eq!(err.kind, ErrorKind::TooManyStatuses);
    assert_eq!(err.span, Span::new(1, 2 + list.len()));
}

#[test]
fn test_duplicates_count_towards_the_limit() {
    let list = vec!["200"; 129].join(",");
    let err = error(&format!("%{}s", list));
    assert_eq!(err.kind, ErrorKind::TooManyStatuses);
}

#[test]
fn test_name_overflow_boundary() {
    let options = Options::default();
    let mut scratch = Scratch::with_capacity(16);

    let fits = format!("%{{{}}}i", "a".repeat(16));
    let mut recorder = Recorder::new();
    logformat::parse_with_scratch(&fits, &mut recorder, &options, &mut scratch).unwrap();
    assert_eq!(recorder.events().len(), 1);

    let name = "a".repeat(17);
    let overflows = format!("%{{{}}}i", name);
    let err = logformat::parse_with_scratch(&overflows, &mut Recorder::new(), &options, &mut scratch)
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NameOverflow);
    assert_eq!(err.snippet(&overflows), name);
}

#[test]
fn test_default_scratch_capacity() {
    let fits = format!("%{{{}}}t", "%".repeat(logformat::DEFAULT_SCRATCH_CAPACITY));
    assert!(logformat::parse(&fits, &mut Recorder::new(), &Options::default()).is_ok());

    let overflows = format!("%{{{}}}t", "%".repeat(logformat::DEFAULT_SCRATCH_CAPACITY + 1));
    assert_eq!(error(&overflows).kind, ErrorKind::NameOverflow);
}

#[test]
fn test_hook_on_literal() {
    let mut recorder = Recorder::declining_at(1);
    let err = logformat::parse("abc", &mut recorder, &Options::default()).unwrap_err();
    assert_eq!(err, Error::new(ErrorKind::Hook, Span::new(1, 2)));
}

#[test]
fn test_hook_on_escape() {
    let mut recorder = Recorder::declining_at(0);
    let err = logformat::parse("\\t%s", &mut recorder, &Options::default()).unwrap_err();
    assert_eq!(err, Error::new(ErrorKind::Hook, Span::new(0, 2)));
}

#[test]
fn test_hook_on_directive() {
    let format = "%h %!200,304<{X-Id}i %s";
    let mut recorder = Recorder::declining_at(2);
    let err = logformat::parse(format, &mut recorder, &Options::default()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Hook);
    assert_eq!(err.snippet(format), "%!200,304<{X-Id}i");
}

#[test]
fn test_hook_stops_the_scan() {
    let mut recorder = Recorder::declining_at(3);
    let err = logformat::parse("%h %u %s %b", &mut recorder, &Options::default()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Hook);
    assert_eq!(recorder.events().len(), 3);
    assert_eq!(recorder.calls(), 4);
}

#[test]
fn test_error_display() {
    let err = error("%h %Z");
    assert_eq!(err.to_string(), "unrecognised directive at 3..5");
}

#[test]
fn test_error_serializes() {
    let err = error("%{}i");
    let json = serde_json::to_value(err).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "kind": "empty_name", "span": { "start": 1, "end": 3 } })
    );
}
