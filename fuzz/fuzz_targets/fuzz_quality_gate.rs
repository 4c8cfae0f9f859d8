#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

use ecg_analysis::pipeline::EcgAnalyzer;
use ecg_analysis::quality::QualityGate;
use ecg_analysis::signal::RawRecording;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must load, screen and analyze without panicking
    let raw = match RawRecording::from_csv_reader(Cursor::new(data)) {
        Ok(raw) => raw,
        Err(_) => return,
    };

    let gate = QualityGate::default();
    let _ = gate.inspect(&raw, "fuzz");

    if let Ok(screened) = gate.screen(raw.clone()) {
        assert_eq!(screened.recording.time().len(), screened.recording.voltage().len());
    }

    let _ = EcgAnalyzer::default().analyze(raw);
});
