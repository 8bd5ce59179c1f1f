use super::*;

#[test]
fn rng_is_deterministic() {
    let mut a = Rng64::new(123);
    let mut b = Rng64::new(123);
    for _ in 0..10 {
        assert_eq!(a.next_u64(), b.next_u64());
    }
}

#[test]
fn signed_samples_stay_in_range() {
    let mut rng = Rng64::new(7);
    for _ in 0..10_000 {
        let v = rng.next_signed();
        assert!((-1.0..1.0).contains(&v));
    }
}

#[test]
fn base36_tokens_have_requested_length_and_alphabet() {
    let mut rng = Rng64::new(42);
    let tok = rng.next_base36(9);
    assert_eq!(tok.len(), 9);
    assert!(
        tok.chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
    );
    assert_ne!(tok, rng.next_base36(9));
}
