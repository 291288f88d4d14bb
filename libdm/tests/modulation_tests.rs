//! Encoder and decoder tests for libdm
use libdm::{decode, encode, format_bits, parse_bits, Bit, Decoder, DmError, Encoder};

fn sine(freq_hz: f64, sample_rate: f64, len: usize) -> Vec<f64> {
    (0..len)
        .map(|i| (2.0 * std::f64::consts::PI * freq_hz * i as f64 / sample_rate).sin())
        .collect()
}

// ============================================================================
// Concrete Scenarios
// ============================================================================

#[test]
fn test_four_sample_scenario() {
    let modulated = encode(&[0.0, 1.0, 0.0, -1.0], 0.5).unwrap();
    assert_eq!(modulated.bits, vec![Bit::Up, Bit::Up, Bit::Down, Bit::Down]);
    assert_eq!(modulated.reference, vec![0.5, 1.0, 0.5, 0.0]);

    let decoded = decode(&modulated.bits, 0.5).unwrap();
    assert_eq!(decoded, vec![0.5, 1.0, 0.5, 0.0]);
}

#[test]
fn test_classic_five_hz_tone() {
    // 5 Hz tone, 100 Hz sampling, one second, step 0.3
    let samples = sine(5.0, 100.0, 100);
    let modulated = encode(&samples, 0.3).unwrap();
    let expected = "0111110001000000111011111100010000001110\
                    1111110001000000111011111100010000001110\
                    11111100010000001110";
    assert_eq!(format_bits(&modulated.bits), expected);
}

#[test]
fn test_empty_input() {
    let modulated = encode(&[], 0.3).unwrap();
    assert!(modulated.is_empty());
    assert!(modulated.reference.is_empty());
    assert!(decode(&[], 0.3).unwrap().is_empty());
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_length_preservation() {
    for len in [1, 2, 7, 100, 1000] {
        let samples = sine(3.0, 64.0, len);
        let modulated = encode(&samples, 0.1).unwrap();
        assert_eq!(modulated.bits.len(), len);
        assert_eq!(modulated.reference.len(), len);
        assert_eq!(decode(&modulated.bits, 0.1).unwrap().len(), len);
    }
}

#[test]
fn test_decode_is_deterministic() {
    let bits = parse_bits("1101001110001011").unwrap();
    let first = decode(&bits, 0.3).unwrap();
    let second = decode(&bits, 0.3).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_reference_moves_by_exactly_one_step() {
    // dyadic step keeps every partial sum exact
    let samples = sine(7.0, 200.0, 400);
    let modulated = encode(&samples, 0.125).unwrap();
    let mut prev = 0.0;
    for &r in &modulated.reference {
        assert_eq!((r - prev).abs(), 0.125);
        prev = r;
    }
}

#[test]
fn test_reference_steps_with_inexact_step() {
    let samples = sine(5.0, 100.0, 100);
    let modulated = encode(&samples, 0.3).unwrap();
    let mut prev = 0.0;
    for &r in &modulated.reference {
        assert!(((r - prev).abs() - 0.3).abs() < 1e-12);
        prev = r;
    }
}

#[test]
fn test_tie_break_emits_down() {
    let modulated = encode(&[0.0, 0.0, -0.5], 0.5).unwrap();
    // 0 == 0 -> down to -0.5; 0 > -0.5 -> up to 0; -0.5 < 0 -> down
    assert_eq!(modulated.bits, vec![Bit::Down, Bit::Up, Bit::Down]);
}

#[test]
fn test_decoder_replays_encoder_reference_exactly() {
    for step in [0.3, 0.1, 0.07, 1.0 / 3.0] {
        let samples = sine(11.0, 300.0, 600);
        let modulated = encode(&samples, step).unwrap();
        let decoded = decode(&modulated.bits, step).unwrap();
        assert_eq!(decoded, modulated.reference, "step {step}");
    }
}

#[test]
fn test_reference_tracks_slow_signal() {
    // slope well under one step per sample: error stays within two steps
    let samples: Vec<f64> = sine(1.0, 1000.0, 1000).iter().map(|s| s * 0.5).collect();
    let modulated = encode(&samples, 0.01).unwrap();
    for (s, r) in samples.iter().zip(modulated.reference.iter()) {
        assert!((s - r).abs() <= 0.02 + 1e-12, "{s} vs {r}");
    }
}

// ============================================================================
// Parameters
// ============================================================================

#[test]
fn test_step_size_validation() {
    for bad in [0.0, -1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        assert!(matches!(
            encode(&[1.0], bad),
            Err(DmError::InvalidParameter {
                name: "step_size",
                ..
            })
        ));
        assert!(decode(&[Bit::Up], bad).is_err());
    }
}

#[test]
fn test_validation_precedes_processing_of_empty_input() {
    assert!(encode(&[], 0.0).is_err());
    assert!(decode(&[], -2.0).is_err());
}

#[test]
fn test_step_size_accessors() {
    assert_eq!(Encoder::new(0.3).unwrap().step_size(), 0.3);
    assert_eq!(Decoder::new(0.7).unwrap().step_size(), 0.7);
}

// ============================================================================
// Bitstream Text
// ============================================================================

#[test]
fn test_parse_and_format_bits() {
    let bits = parse_bits("10 01\n1").unwrap();
    assert_eq!(bits, vec![Bit::Up, Bit::Down, Bit::Down, Bit::Up, Bit::Up]);
    assert_eq!(format_bits(&bits), "10011");
}

#[test]
fn test_parse_rejects_other_symbols() {
    assert_eq!(
        parse_bits("10x1"),
        Err(DmError::InvalidSymbol {
            symbol: 'x',
            position: 2
        })
    );
}

#[test]
fn test_bit_conversions() {
    assert_eq!(u8::from(Bit::Up), 1);
    assert_eq!(u8::from(Bit::Down), 0);
    assert_eq!(Bit::try_from(1u8), Ok(Bit::Up));
    assert_eq!(Bit::try_from(2u8), Err(DmError::InvalidBitValue(2)));
    assert!(bool::from(Bit::Up));
    assert_eq!(Bit::from(false), Bit::Down);
}

#[test]
fn test_bits_serialize_as_integers() {
    let json = serde_json::to_string(&vec![Bit::Up, Bit::Down]).unwrap();
    assert_eq!(json, "[1,0]");
    let back: Vec<Bit> = serde_json::from_str("[0,1,1]").unwrap();
    assert_eq!(back, vec![Bit::Down, Bit::Up, Bit::Up]);
    assert!(serde_json::from_str::<Vec<Bit>>("[3]").is_err());
}
