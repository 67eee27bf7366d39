use huffman_kernel::{code_words_for, Codebook, HuffmanContext};

const TEXT: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do \
    eiusmod tempor incididunt ut labore et dolore magna aliqua. Ut enim \
    ad minim veniam, quis nostrud exercitation ullamco laboris nisi ut \
    aliquip ex ea commodo consequat. Duis aute irure dolor in reprehenderit \
    in voluptate velit esse cillum dolore eu fugiat nulla pariatur. \
    Excepteur sint occaecat cupidatat non proident, sunt in culpa qui \
    officia deserunt mollit anim id est laborum.";

const LEN: usize = TEXT.len();

fn main() {
    let input: &[u8; LEN] = TEXT.as_bytes().try_into().unwrap();

    let mut ctx: HuffmanContext<LEN, { code_words_for(LEN) }> = HuffmanContext::new();
    let summary = ctx.compress_and_verify(input).unwrap();

    println!("{summary:?}");
    println!(
        "{} bytes -> {} bits ({:.2} bits/symbol)",
        LEN,
        summary.encoded_bits,
        summary.encoded_bits as f64 / LEN as f64
    );

    let book = Codebook::from_tree(ctx.tree()).unwrap();
    for (index, code) in book.iter() {
        let symbol = huffman_kernel::domain::symbol_at(index) as char;
        println!("{symbol:?}: {:0width$b}", code.bits(), width = code.len());
    }
}
