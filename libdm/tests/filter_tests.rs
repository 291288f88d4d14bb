//! Smoothing filter tests for libdm
use libdm::{smooth, DmError, FilterCoefficients, SmoothingFilter, DEFAULT_FILTER_ORDER};
use std::f64::consts::PI;

fn tone(freq_hz: f64, sample_rate: f64, len: usize) -> Vec<f64> {
    (0..len)
        .map(|i| (2.0 * PI * freq_hz * i as f64 / sample_rate).sin())
        .collect()
}

// ============================================================================
// Length and Alignment
// ============================================================================

#[test]
fn test_length_preservation() {
    for len in [5, 6, 15, 16, 100, 1001] {
        let signal = tone(3.0, 100.0, len);
        let out = smooth(&signal, 10.0, 100.0, DEFAULT_FILTER_ORDER).unwrap();
        assert_eq!(out.len(), len);
    }
}

#[test]
fn test_passband_tone_is_not_delayed() {
    // 2 Hz sits deep in the passband of a 10 Hz cutoff
    let signal = tone(2.0, 100.0, 200);
    let out = smooth(&signal, 10.0, 100.0, 4).unwrap();
    for i in 20..180 {
        assert!(
            (out[i] - signal[i]).abs() < 1e-4,
            "sample {i}: {} vs {}",
            out[i],
            signal[i]
        );
    }
}

#[test]
fn test_nyquist_tone_is_removed() {
    let signal: Vec<f64> = (0..200).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
    let out = smooth(&signal, 10.0, 100.0, 4).unwrap();
    for v in &out[50..150] {
        assert!(v.abs() < 1e-4, "residual {v}");
    }
}

#[test]
fn test_zero_phase_commutes_with_reversal() {
    let signal: Vec<f64> = (0..120)
        .map(|i| (i as f64 * 0.37).sin() + 0.3 * (i as f64 * 2.1).cos())
        .collect();
    let mut reversed = signal.clone();
    reversed.reverse();

    let forward = smooth(&signal, 8.0, 100.0, 4).unwrap();
    let mut backward = smooth(&reversed, 8.0, 100.0, 4).unwrap();
    backward.reverse();

    // only the edge transients depend on direction
    for i in 30..90 {
        assert!((forward[i] - backward[i]).abs() < 1e-3, "sample {i}");
    }
}

#[test]
fn test_matches_reference_forward_backward_output() {
    // Short staircase, order 2, fc = 0.2 * Nyquist. The whole output is
    // pinned, including the edge samples shaped by the odd extension.
    let staircase = [
        0.5, 1.0, 0.5, 0.0, -0.5, -1.0, -0.5, 0.0, 0.5, 1.0, 1.5, 1.0,
    ];
    let expected = [
        0.499_651_316_027_671_16,
        0.338_627_445_570_200_97,
        0.137_695_448_656_000_09,
        -0.089_055_821_540_563_85,
        -0.272_385_924_252_285_64,
        -0.331_177_129_723_841_83,
        -0.224_414_021_568_347_94,
        0.022_500_054_103_211_875,
        0.334_222_206_429_775,
        0.625_726_428_211_978_2,
        0.843_006_839_764_394,
        0.993_588_469_427_397_9,
    ];

    let out = smooth(&staircase, 10.0, 100.0, 2).unwrap();

    assert_eq!(out.len(), expected.len());
    for (i, (got, want)) in out.iter().zip(&expected).enumerate() {
        assert!((got - want).abs() < 1e-9, "sample {i}: got {got}, want {want}");
    }
}

// ============================================================================
// Error Cases
// ============================================================================

#[test]
fn test_nyquist_violation() {
    let signal = tone(1.0, 100.0, 64);
    for cutoff in [50.0, 60.0, 1000.0] {
        assert_eq!(
            smooth(&signal, cutoff, 100.0, 4),
            Err(DmError::NyquistViolation {
                cutoff_hz: cutoff,
                sample_rate_hz: 100.0
            })
        );
    }
}

#[test]
fn test_insufficient_samples() {
    let signal = vec![0.5; 4];
    assert_eq!(
        smooth(&signal, 10.0, 100.0, 4),
        Err(DmError::InsufficientSamples {
            required: 5,
            actual: 4
        })
    );
    assert!(smooth(&[], 10.0, 100.0, 1).is_err());
    assert!(smooth(&[1.0], 10.0, 100.0, 1).is_err());
    assert_eq!(smooth(&[1.0, 1.0], 10.0, 100.0, 1).unwrap().len(), 2);
}

#[test]
fn test_invalid_parameters() {
    let signal = tone(1.0, 100.0, 64);
    let cases = [
        (0.0, 100.0, 4, "cutoff_hz"),
        (-5.0, 100.0, 4, "cutoff_hz"),
        (f64::NAN, 100.0, 4, "cutoff_hz"),
        (10.0, 0.0, 4, "sample_rate_hz"),
        (10.0, f64::INFINITY, 4, "sample_rate_hz"),
        (10.0, 100.0, 0, "order"),
    ];
    for (cutoff, rate, order, expected) in cases {
        match smooth(&signal, cutoff, rate, order) {
            Err(DmError::InvalidParameter { name, .. }) => assert_eq!(name, expected),
            other => panic!("expected InvalidParameter({expected}), got {other:?}"),
        }
    }
}

#[test]
fn test_configuration_errors_do_not_need_samples() {
    // bad parameters surface before the input length is looked at
    assert!(matches!(
        smooth(&[], 80.0, 100.0, 4),
        Err(DmError::NyquistViolation { .. })
    ));
    assert!(matches!(
        SmoothingFilter::new(10.0, 100.0, 0),
        Err(DmError::InvalidParameter { .. })
    ));
}

// ============================================================================
// Coefficients
// ============================================================================

#[test]
fn test_filter_reuses_designed_coefficients() {
    let filter = SmoothingFilter::new(10.0, 100.0, 4).unwrap();
    let direct = FilterCoefficients::butterworth_lowpass(4, 0.2).unwrap();
    assert_eq!(filter.coefficients(), &direct);
    assert_eq!(filter.order(), 4);
    assert_eq!(filter.min_samples(), 5);
    assert_eq!(filter.cutoff_hz(), 10.0);
    assert_eq!(filter.sample_rate_hz(), 100.0);
}

#[test]
fn test_coefficient_shape() {
    for order in 1..=6 {
        let c = FilterCoefficients::butterworth_lowpass(order, 0.25).unwrap();
        assert_eq!(c.b().len(), order + 1);
        assert_eq!(c.a().len(), order + 1);
        assert_eq!(c.a()[0], 1.0);
        // numerator is symmetric: every zero sits at z = -1
        for k in 0..=order {
            assert!((c.b()[k] - c.b()[order - k]).abs() < 1e-15);
        }
    }
}

#[test]
fn test_roll_off_is_monotonic() {
    let c = FilterCoefficients::butterworth_lowpass(4, 0.2).unwrap();
    let mut prev = c.magnitude_at(0.0);
    for step in 1..=100 {
        let mag = c.magnitude_at(step as f64 / 100.0);
        assert!(mag <= prev + 1e-12);
        prev = mag;
    }
    assert!(c.magnitude_at(1.0) < 1e-10);
}
