#![no_main]
use libfuzzer_sys::fuzz_target;
use logformat::{Options, Recorder, Scratch};

fuzz_target!(|data: &[u8]| {
    // Lossy conversion keeps inputs that are "almost" text.
    let s = String::from_utf8_lossy(data);
    let format = s.split('\0').next().unwrap_or_default();

    let mut scratch = Scratch::with_capacity(16);
    let mut recorder = Recorder::new();
    if let Err(err) =
        logformat::parse_with_scratch(&s, &mut recorder, &Options::default(), &mut scratch)
    {
        assert!(err.span.start <= err.span.end);
        assert!(err.span.end <= format.len());
    }
});
