use game::button::ButtonId;
use game::sequence::{SEQUENCE_LENGTH, generate};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn draws_cover_every_button_roughly_evenly() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut counts = [0usize; 4];
    let draws = 1_000;
    for _ in 0..draws {
        for button in generate(&mut rng, SEQUENCE_LENGTH).as_slice() {
            counts[button.index()] += 1;
        }
    }

    let total = draws * SEQUENCE_LENGTH;
    let expected = total / 4;
    for (index, count) in counts.iter().enumerate() {
        let button = ButtonId::from_index(index).expect("index in range");
        assert!(
            count.abs_diff(expected) < expected / 10,
            "{button} drawn {count} times, expected about {expected}"
        );
    }
}

#[test]
fn repeats_are_allowed() {
    let mut rng = StdRng::seed_from_u64(11);
    let repeated = (0..200).any(|_| {
        let seq = generate(&mut rng, SEQUENCE_LENGTH);
        seq.as_slice().windows(2).any(|pair| pair[0] == pair[1])
    });
    assert!(repeated);
}

#[test]
fn different_seeds_usually_differ() {
    let a = generate(&mut StdRng::seed_from_u64(1), SEQUENCE_LENGTH);
    let b = generate(&mut StdRng::seed_from_u64(2), SEQUENCE_LENGTH);
    let c = generate(&mut StdRng::seed_from_u64(3), SEQUENCE_LENGTH);
    assert!(a != b || b != c);
}
