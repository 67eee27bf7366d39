use std::time::Instant;

use huffman_kernel::{DefaultContext, Kernel, INPUT_LEN};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn main() {
    let iters: u32 = std::env::args()
        .nth(1)
        .map(|s| s.parse().expect("iteration count must be a number"))
        .unwrap_or(100);

    let mut rng = StdRng::seed_from_u64(42);
    let mut ctx = Box::new(DefaultContext::new());
    let mut input = [0u8; INPUT_LEN];

    let mut total = std::time::Duration::ZERO;
    for _ in 0..iters {
        for slot in input.iter_mut() {
            *slot = rng.gen_range(b' '..=b'~');
        }
        let start = Instant::now();
        ctx.run(&input);
        total += start.elapsed();
    }

    println!(
        "Huffman compression, {iters} iterations: {:.4} ms",
        total.as_secs_f64() * 1000.0
    );
}
