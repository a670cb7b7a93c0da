use falcon_prng::{
    Cached, DomainSeparation, KeccakPrng, KeccakPrngConfig, PrngError, PrngKind, Recompute,
    ShakePrng, XofPrng, MAX_BUFFER_SIZE,
};

fn engines() -> Vec<(&'static str, Box<dyn XofPrng>)> {
    let cached: Box<dyn XofPrng> = Box::new(KeccakPrng::new());
    let recompute: Box<dyn XofPrng> =
        Box::new(KeccakPrng::<Recompute>::with_config(KeccakPrngConfig::default()));
    let shake: Box<dyn XofPrng> = Box::new(ShakePrng::new());
    vec![
        ("keccak256/cached", cached),
        ("keccak256/recompute", recompute),
        ("shake256", shake),
    ]
}

fn run(prng: &mut dyn XofPrng, inputs: &[&[u8]], reads: &[usize]) -> Vec<Vec<u8>> {
    for input in inputs {
        prng.inject(input).unwrap();
    }
    prng.finalize().unwrap();
    reads.iter().map(|&n| prng.extract_vec(n).unwrap()).collect()
}

#[test]
fn test_same_input_same_output() {
    for ((name, mut a), (_, mut b)) in engines().into_iter().zip(engines()) {
        let out1 = run(a.as_mut(), &[b"test input"], &[32]);
        let out2 = run(b.as_mut(), &[b"test input"], &[32]);
        assert_eq!(out1, out2, "{}: same input should generate same output", name);
        assert_eq!(out1[0].len(), 32);
    }
}

#[test]
fn test_different_length_outputs_are_unique() {
    for (name, mut prng) in engines() {
        let out = run(prng.as_mut(), &[b"test input"], &[32, 64]);
        assert_ne!(
            &out[0][..],
            &out[1][..32],
            "{}: a later read must not repeat an earlier one",
            name
        );
    }
}

#[test]
fn test_fresh_engines_share_prefix() {
    for ((name, mut short), (_, mut long)) in engines().into_iter().zip(engines()) {
        let out32 = run(short.as_mut(), &[b"test input"], &[32]);
        let out64 = run(long.as_mut(), &[b"test input"], &[64]);
        assert_eq!(&out32[0][..], &out64[0][..32], "{}", name);
    }
}

#[test]
fn test_incremental_injection() {
    for ((name, mut single), (_, mut split)) in engines().into_iter().zip(engines()) {
        let out1 = run(single.as_mut(), &[b"testinput"], &[32]);
        let out2 = run(split.as_mut(), &[b"test", b"input"], &[32]);
        assert_eq!(out1, out2, "{}: incremental injection should match single injection", name);
    }
}

#[test]
fn test_sequential_outputs_are_unique() {
    for (name, mut prng) in engines() {
        let out = run(prng.as_mut(), &[b"test sequence"], &[16, 16, 16]);
        assert_ne!(out[0], out[1], "{}", name);
        assert_ne!(out[1], out[2], "{}", name);
        assert_ne!(out[0], out[2], "{}", name);
    }
}

#[test]
fn test_flavors_produce_different_streams() {
    let mut engines = engines();
    let outputs: Vec<Vec<u8>> = engines
        .iter_mut()
        .map(|(_, prng)| run(prng.as_mut(), &[b"test input"], &[32]).remove(0))
        .collect();
    assert_eq!(outputs[0], outputs[1]);
    assert_ne!(outputs[0], outputs[2]);
}

#[test]
fn test_inject_after_finalize() {
    for (name, mut prng) in engines() {
        prng.finalize().unwrap();
        assert_eq!(prng.inject(b"test"), Err(PrngError::InvalidState), "{}", name);
    }
}

#[test]
fn test_failed_inject_leaves_stream_unchanged() {
    for ((name, mut guarded), (_, mut clean)) in engines().into_iter().zip(engines()) {
        guarded.inject(b"seed").unwrap();
        guarded.finalize().unwrap();
        let first = guarded.extract_vec(8).unwrap();
        assert_eq!(guarded.inject(b"late"), Err(PrngError::InvalidState));
        let second = guarded.extract_vec(8).unwrap();

        let expected = run(clean.as_mut(), &[b"seed"], &[16]);
        assert_eq!([first, second].concat(), expected[0], "{}", name);
    }
}

#[test]
fn test_extract_before_finalize() {
    for (name, mut prng) in engines() {
        let mut out = [0u8; 32];
        assert_eq!(prng.extract(&mut out), Err(PrngError::InvalidState), "{}", name);
        assert_eq!(out, [0u8; 32]);
        assert!(!prng.is_finalized());
    }
}

#[test]
fn test_double_finalize() {
    for ((name, mut twice), (_, mut once)) in engines().into_iter().zip(engines()) {
        twice.inject(b"test").unwrap();
        twice.finalize().unwrap();
        assert_eq!(twice.finalize(), Err(PrngError::InvalidState), "{}", name);
        let expected = run(once.as_mut(), &[b"test"], &[32]);
        assert_eq!(twice.extract_vec(32).unwrap(), expected[0], "{}", name);
    }
}

#[test]
fn test_buffer_limits() {
    let large_input = vec![b'A'; MAX_BUFFER_SIZE + 1];
    for (name, mut prng) in engines() {
        assert_eq!(prng.inject(&large_input), Err(PrngError::Overflow), "{}", name);
        prng.inject(&large_input[..MAX_BUFFER_SIZE]).unwrap();
        assert_eq!(prng.inject(b"A"), Err(PrngError::Overflow), "{}", name);
        prng.finalize().unwrap();
    }
}

#[test]
fn test_overflow_is_not_partially_applied() {
    for ((name, mut full), (_, mut exact)) in engines().into_iter().zip(engines()) {
        full.inject(&[7u8; MAX_BUFFER_SIZE - 2]).unwrap();
        assert_eq!(full.inject(&[7u8; 3]), Err(PrngError::Overflow));
        full.finalize().unwrap();

        let expected = run(exact.as_mut(), &[&[7u8; MAX_BUFFER_SIZE - 2]], &[32]);
        assert_eq!(full.extract_vec(32).unwrap(), expected[0], "{}", name);
    }
}

#[test]
fn test_zero_length_operations() {
    for ((name, mut with_empty), (_, mut plain)) in engines().into_iter().zip(engines()) {
        let out1 = run(with_empty.as_mut(), &[b"", b"input", b""], &[0, 32, 0]);
        let out2 = run(plain.as_mut(), &[b"input"], &[32]);
        assert!(out1[0].is_empty());
        assert_eq!(out1[1], out2[0], "{}", name);
    }
}

#[test]
fn test_custom_capacity() {
    let mut prng = KeccakPrng::<Cached>::with_config(KeccakPrngConfig {
        capacity: 48,
        domain_separation: DomainSeparation::None,
    });
    assert_eq!(prng.capacity(), 48);
    prng.inject(&[1u8; 48]).unwrap();
    assert_eq!(prng.inject(&[1u8]), Err(PrngError::Overflow));
    prng.finalize().unwrap();
}

#[test]
fn test_session_engines_match_direct_engines() {
    let mut session = PrngKind::Keccak256.engine();
    let mut direct = KeccakPrng::new();
    let out1 = run(&mut session, &[b"session"], &[50]);
    let out2 = run(&mut direct, &[b"session"], &[50]);
    assert_eq!(out1, out2);

    let mut session = PrngKind::Shake256.engine();
    let mut direct = ShakePrng::new();
    let out1 = run(&mut session, &[b"session"], &[50]);
    let out2 = run(&mut direct, &[b"session"], &[50]);
    assert_eq!(out1, out2);
}
