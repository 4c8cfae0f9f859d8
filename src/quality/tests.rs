use super::*;
use crate::signal::SignalError;

fn clean_rows() -> RawRecording {
    RawRecording::from_rows([("0", "-0.145"), ("0.003", "-0.145"), ("0.006", "-0.12"), ("0.008", "-0.135")])
}

#[test]
fn test_clean_recording_passes_unchanged() {
    let raw = clean_rows();
    let gate = QualityGate::default();

    assert_eq!(gate.classify(&raw), Diagnosis::None);

    let screened = gate.screen(raw.clone()).unwrap();
    assert!(screened.repairs.is_empty());
    assert_eq!(screened.recording, raw.into_recording().unwrap());
}

#[test]
fn test_precedence_nan_before_everything() {
    let raw = RawRecording::from_rows([("0", "301"), ("1", "bad data"), ("2", ""), ("NaN", "0.1")]);
    assert_eq!(QualityGate::default().classify(&raw), Diagnosis::NanPresent);
}

#[test]
fn test_precedence_invalid_before_overflow() {
    let raw = RawRecording::from_rows([("0", "300"), ("bad data", "0.1")]);
    assert_eq!(QualityGate::default().classify(&raw), Diagnosis::InvalidToken);
}

#[test]
fn test_overflow_before_blank() {
    let raw = RawRecording::from_rows([("0", ""), ("1", "0.2"), ("2", "300.5")]);
    assert_eq!(QualityGate::default().classify(&raw), Diagnosis::VoltageOverflow);
}

#[test]
fn test_overflow_only_checks_voltage() {
    let raw = RawRecording::from_rows([("300", "0.1"), ("301", "0.2")]);
    assert_eq!(QualityGate::default().classify(&raw), Diagnosis::None);
}

#[test]
fn test_negative_overflow() {
    let raw = RawRecording::from_rows([("0", "0.1"), ("1", "-450")]);
    assert_eq!(QualityGate::default().classify(&raw), Diagnosis::VoltageOverflow);
}

#[test]
fn test_custom_voltage_limit() {
    let raw = RawRecording::from_rows([("0", "0.1"), ("1", "5.5")]);
    assert_eq!(QualityGate::new(5.0).unwrap().classify(&raw), Diagnosis::VoltageOverflow);
    assert_eq!(QualityGate::new(6.0).unwrap().classify(&raw), Diagnosis::None);
}

#[test]
fn test_voltage_limit_rejected_unless_finite_and_positive() {
    for limit in [f64::NAN, f64::INFINITY, 0.0, -300.0] {
        let err = QualityGate::new(limit).unwrap_err();
        assert!(matches!(err, QualityError::InvalidVoltageLimit(_)), "limit {} accepted", limit);
    }
    assert_eq!(QualityGate::new(DEFAULT_VOLTAGE_LIMIT).unwrap().voltage_limit(), 300.0);
}

#[test]
fn test_overflow_is_numeric_not_textual() {
    let raw = RawRecording::from_rows([("0", "0.300"), ("1", "3000e-3"), ("2", "0.1")]);
    assert_eq!(QualityGate::default().classify(&raw), Diagnosis::None);

    let raw = RawRecording::from_rows([("0", "0.1"), ("1", "300")]);
    assert_eq!(QualityGate::default().classify(&raw), Diagnosis::VoltageOverflow);
}

#[test]
fn test_overflow_halts_screening() {
    let raw = RawRecording::from_rows([("0", "0.1"), ("1", "300"), ("2", "0.2")]);
    let err = QualityGate::default().screen(raw).unwrap_err();

    match err {
        QualityError::VoltageOverflow { index, value, limit } => {
            assert_eq!(index, 1);
            assert_eq!(value, 300.0);
            assert_eq!(limit, DEFAULT_VOLTAGE_LIMIT);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_overflow_found_after_nan_repair() {
    let raw = RawRecording::from_rows([("0", "NaN"), ("1", "0.1"), ("2", "350")]);
    let err = QualityGate::default().screen(raw).unwrap_err();
    assert!(matches!(err, QualityError::VoltageOverflow { index: 2, .. }));
}

#[test]
fn test_interpolation_is_midpoint() {
    let raw = RawRecording::from_rows([("0", "0.5"), ("1", "NaN"), ("2", "1.5")]);
    let screened = QualityGate::default().screen(raw).unwrap();

    assert_eq!(screened.repairs, vec![Diagnosis::NanPresent]);
    assert_eq!(screened.recording.voltage(), &[0.5, 1.0, 1.5]);
}

#[test]
fn test_interpolation_index_space_on_both_axes() {
    let raw = RawRecording::from_rows([
        ("0", "1.0"),
        ("NaN", "NaN"),
        ("NaN", "NaN"),
        ("3", "4.0"),
    ]);
    let screened = QualityGate::default().screen(raw).unwrap();

    assert_eq!(screened.recording.time(), &[0.0, 1.0, 2.0, 3.0]);
    assert_eq!(screened.recording.voltage(), &[1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn test_interpolation_clamps_edges() {
    let tokens = vec![Token::Missing, Token::Valid(2.0), Token::Valid(4.0), Token::Missing];
    let filled = interpolate_missing("voltage", tokens).unwrap();

    assert_eq!(
        filled,
        vec![Token::Valid(2.0), Token::Valid(2.0), Token::Valid(4.0), Token::Valid(4.0)]
    );
}

#[test]
fn test_interpolation_without_anchor_fails() {
    let err = interpolate_missing("time", vec![Token::Missing, Token::Missing]).unwrap_err();
    assert!(matches!(err, QualityError::NoValidSamples { axis: "time" }));
}

#[test]
fn test_drop_invalid_keeps_alignment() {
    let raw = RawRecording::from_rows([
        ("0", "0.1"),
        ("1", "bad data"),
        ("bad data", "0.3"),
        ("3", "0.4"),
    ]);
    let screened = QualityGate::default().screen(raw).unwrap();

    assert_eq!(screened.repairs, vec![Diagnosis::InvalidToken]);
    assert_eq!(screened.recording.time(), &[0.0, 3.0]);
    assert_eq!(screened.recording.voltage(), &[0.1, 0.4]);
}

#[test]
fn test_drop_blank_keeps_alignment() {
    let raw = RawRecording::from_rows([("0", "0.1"), ("1", " "), ("", "0.3"), ("3", "0.4")]);
    let screened = QualityGate::default().screen(raw).unwrap();

    assert_eq!(screened.repairs, vec![Diagnosis::BlankToken]);
    assert_eq!(screened.recording.time().len(), screened.recording.voltage().len());
    assert_eq!(screened.recording.time(), &[0.0, 3.0]);
}

#[test]
fn test_multiple_defects_repaired_in_precedence_order() {
    let raw = RawRecording::from_rows([
        ("0", "0.5"),
        ("1", "NaN"),
        ("2", "1.5"),
        ("3", "bad data"),
        ("4", ""),
        ("5", "2.5"),
    ]);
    let screened = QualityGate::default().screen(raw).unwrap();

    assert_eq!(
        screened.repairs,
        vec![Diagnosis::NanPresent, Diagnosis::InvalidToken, Diagnosis::BlankToken]
    );
    assert_eq!(screened.recording.time(), &[0.0, 1.0, 2.0, 5.0]);
    assert_eq!(screened.recording.voltage(), &[0.5, 1.0, 1.5, 2.5]);
}

#[test]
fn test_screening_is_idempotent() {
    let gate = QualityGate::default();
    let first = gate
        .screen(RawRecording::from_rows([("0", "0.1"), ("1", "NaN"), ("2", "0.3")]))
        .unwrap();

    let (time, voltage) = first.recording.clone().into_parts();
    let again = RawRecording::from_samples(&time, &voltage).unwrap();

    assert_eq!(gate.classify(&again), Diagnosis::None);
    let second = gate.screen(again).unwrap();
    assert!(second.repairs.is_empty());
    assert_eq!(second.recording, first.recording);
}

#[test]
fn test_everything_dropped_is_an_error() {
    let raw = RawRecording::from_rows([("bad data", "0.1"), ("1", "bad data")]);
    let err = QualityGate::default().screen(raw).unwrap_err();
    assert!(matches!(err, QualityError::Signal(SignalError::Empty)));
}

#[test]
fn test_strategy_table() {
    assert_eq!(RepairStrategy::for_diagnosis(Diagnosis::NanPresent), RepairStrategy::Interpolate);
    assert_eq!(RepairStrategy::for_diagnosis(Diagnosis::InvalidToken), RepairStrategy::DropInvalid);
    assert_eq!(RepairStrategy::for_diagnosis(Diagnosis::BlankToken), RepairStrategy::DropBlank);
    assert_eq!(RepairStrategy::for_diagnosis(Diagnosis::VoltageOverflow), RepairStrategy::Halt);
    assert_eq!(RepairStrategy::for_diagnosis(Diagnosis::None), RepairStrategy::Convert);
}

#[test]
fn test_severity() {
    assert_eq!(Diagnosis::VoltageOverflow.severity(), Level::Warn);
    assert_eq!(Diagnosis::NanPresent.severity(), Level::Error);
    assert_eq!(Diagnosis::InvalidToken.severity(), Level::Error);
    assert_eq!(Diagnosis::BlankToken.severity(), Level::Error);
    assert!(Diagnosis::VoltageOverflow.is_fatal());
    assert!(!Diagnosis::BlankToken.is_fatal());
}

#[test]
fn test_quality_report() {
    let raw = RawRecording::from_rows([("0", "NaN"), ("1", "bad data"), ("2", ""), ("3", "0.2")]);
    let report = QualityGate::default().inspect(&raw, "test.csv");

    assert_eq!(report.rows, 4);
    assert_eq!(report.counts, DefectCounts { missing: 1, invalid: 1, overflow: 0, blank: 1 });
    assert_eq!(report.diagnosis(), Diagnosis::NanPresent);
    assert!(!report.has_failures());
    assert_eq!(report.repairable_count(), 3);
    assert_eq!(report.clean_count(), 1);
    assert_eq!(
        report.planned_repairs(),
        vec![RepairStrategy::Interpolate, RepairStrategy::DropInvalid, RepairStrategy::DropBlank]
    );

    let overflow = report.checks.iter().find(|c| c.diagnosis == Diagnosis::VoltageOverflow).unwrap();
    assert_eq!(overflow.status(), CheckStatus::Clean);
    assert_eq!(overflow.strategy, RepairStrategy::Halt);

    let output = format!("{}", report);
    assert!(output.contains("test.csv (4 rows)"));
    assert!(output.contains("[fix ] missing values: 1 cell, interpolate"));
    assert!(output.contains("[fix ] blank tokens: 1 cell, drop rows"));
    assert!(output.contains("[ok  ] voltage overflow"));
    assert!(output.contains("Signal usable after repair (1 clean, 3 repairable, 0 fatal)"));
}

#[test]
fn test_quality_report_overflow_fails() {
    let raw = RawRecording::from_rows([("0", "0.1"), ("1", "999"), ("2", "-400")]);
    let report = QualityGate::default().inspect(&raw, "hot.csv");

    assert!(report.has_failures());
    assert_eq!(report.fatal_count(), 1);
    assert_eq!(report.counts.overflow, 2);
    assert!(report.planned_repairs().is_empty());

    let output = format!("{}", report);
    assert!(output.contains("[HALT] voltage overflow: 2 samples, halt, |v| >= 300"));
    assert!(output.contains("Signal UNSAFE"));
}

#[test]
fn test_quality_report_empty_recording() {
    let raw = RawRecording::from_rows(std::iter::empty::<(&str, &str)>());
    let report = QualityGate::default().inspect(&raw, "empty.csv");

    assert!(report.has_failures());
    assert_eq!(report.fatal_count(), 0);
    assert_eq!(report.clean_count(), 4);
    assert!(report.to_string().contains("No samples"));
}
