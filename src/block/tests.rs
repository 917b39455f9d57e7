use super::lanes::{self, portable};
use super::*;
use std::collections::HashSet;
use std::thread;

#[test]
fn equality_is_exact_on_every_bit() {
    let a = Block::from_halves(0x0123_4567_89ab_cdef, 0xfedc_ba98_7654_3210);
    let b = a;
    assert!(a.equals(&b));
    for bit in 0..128 {
        let flipped = Block::from(u128::from(b) ^ (1u128 << bit));
        assert!(!a.equals(&flipped), "bit {bit} flip went unnoticed");
        assert_ne!(a, flipped);
    }
}

#[test]
fn hex_renders_high_half_first() {
    let block = Block::from_halves(0, 1);
    assert_eq!(block.to_hex(), "0000000000000000 0000000000000001\n");

    let block = Block::from_halves(0xdead_beef, 0x1);
    assert_eq!(block.to_hex(), "00000000deadbeef 0000000000000001\n");
}

#[test]
fn decimal_renders_unsigned_halves() {
    assert_eq!(Block::from_halves(0, 1).to_decimal(), "0 1\n");
    assert_eq!(
        Block::from(u128::MAX).to_decimal(),
        "18446744073709551615 18446744073709551615\n"
    );
}

#[test]
fn widest_encodings_fit_capacity() {
    let widest = Block::from(u128::MAX);
    assert!(widest.to_hex().len() < TEXT_CAPACITY);
    assert!(widest.to_decimal().len() < TEXT_CAPACITY);
}

#[test]
#[should_panic(expected = "Buffer overflow")]
fn oversized_text_is_fatal() {
    super::bounded_text("to_hex", "x".repeat(TEXT_CAPACITY));
}

#[test]
fn halves_and_lanes_agree() {
    let block = Block::from_lanes([1, 2, 3, 4]);
    assert_eq!(block.low(), (2u64 << 32) | 1);
    assert_eq!(block.high(), (4u64 << 32) | 3);
    assert_eq!(Block::from_halves(block.high(), block.low()), block);
    assert_eq!(format!("{block}"), "0000000400000003 0000000200000001");
    assert_eq!(format!("{block:x}"), "4000000030000000200000001");
}

#[test]
fn seed_scales_each_lane() {
    assert_eq!(lanes::seed_lanes(1), [11, 7, 3, 1]);
    assert_eq!(lanes::seed_lanes(2), [22, 14, 6, 2]);
    let generator = BlockGenerator::seeded(5);
    assert_eq!(generator.state().lanes(), [55, 35, 15, 5]);
}

#[test]
fn first_output_for_seed_one() {
    let mut generator = BlockGenerator::seeded(1);
    let block = generator.advance();
    assert_eq!(block.lanes(), [4885154, 10517166, 14379706, 69070]);
    assert_eq!(generator.state(), block);
}

#[test]
fn lanes_wrap_modulo_two_to_the_32() {
    let next = portable::step([0, 0, 0, u32::MAX]);
    assert_eq!(next[3], u32::MAX.wrapping_mul(69069).wrapping_add(1));
    assert_eq!(next[3], 4294898228);
}

#[test]
fn split_multiply_matches_lane_formula() {
    let mut state: [u32; 4] = [0x1234_5678, 0x9abc_def0, 0xffff_ffff, 0x0000_0001];
    for _ in 0..64 {
        let expected: [u32; 4] = std::array::from_fn(|i| {
            state[i]
                .wrapping_mul(lanes::MULTIPLIER[i])
                .wrapping_add(lanes::INCREMENT[i])
        });
        let next = portable::step(state);
        assert_eq!(next, expected);
        state = next;
    }
}

#[cfg(all(target_arch = "x86_64", target_feature = "sse2"))]
#[test]
fn sse2_matches_portable() {
    let mut generator = BlockGenerator::seeded(0xC0FF_EE11);
    for _ in 0..256 {
        let lanes = generator.advance().lanes();
        assert_eq!(lanes::sse2::step(lanes), portable::step(lanes));
    }
}

#[test]
fn same_seed_same_sequence() {
    let first: Vec<Block> = BlockGenerator::seeded(42).take(100).collect();
    let second: Vec<Block> = BlockGenerator::seeded(42).take(100).collect();
    assert_eq!(first, second);
}

#[test]
fn reseeding_resets_the_sequence() {
    let mut generator = BlockGenerator::seeded(7);
    let expected = generator.advance();
    generator.advance();
    generator.seed(7);
    assert_eq!(generator.advance(), expected);
}

#[test]
fn distinct_seeds_diverge() {
    let mut seen = HashSet::new();
    for seed in (1u32..=1000).map(|i| i.wrapping_mul(2_654_435_761)) {
        let mut generator = BlockGenerator::seeded(seed);
        assert!(
            seen.insert(generator.advance()),
            "seed {seed} collided on its first output"
        );
    }
}

#[test]
fn unseeded_generator_starts_from_zero() {
    let mut generator = BlockGenerator::new();
    assert_eq!(generator.state(), Block::ZERO);
    assert_eq!(generator.advance().lanes(), lanes::INCREMENT);
}

#[test]
fn fill_matches_repeated_advance() {
    let mut filled = [Block::ZERO; 8];
    BlockGenerator::seeded(3).fill(&mut filled);
    let mut generator = BlockGenerator::seeded(3);
    for block in filled {
        assert_eq!(block, generator.advance());
    }
}

#[test]
fn shared_generator_hands_out_each_state_once() {
    let shared = SharedBlockGenerator::new(BlockGenerator::new());
    shared.seed(9);
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let shared = shared.clone();
            thread::spawn(move || (0..50).map(|_| shared.advance()).collect::<Vec<_>>())
        })
        .collect();
    let mut drawn = HashSet::new();
    for handle in handles {
        for block in handle.join().expect("generator thread") {
            assert!(drawn.insert(block));
        }
    }

    let expected: HashSet<Block> = BlockGenerator::seeded(9).take(200).collect();
    assert_eq!(drawn, expected);
}
