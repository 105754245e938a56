//! Unpack fuzz target: the first byte splits the input into a format string and data.
//! Unpack must not panic; it returns values or a CodecError, and never reports a next
//! position past the end of the data.
//! Build with: cargo fuzz run unpack_fuzz (requires nightly and cargo fuzz).

#![cfg_attr(fuzzing, no_main)]

#[cfg(fuzzing)]
use libfuzzer_sys::fuzz_target;

#[cfg(fuzzing)]
fuzz_target!(|input: &[u8]| {
    let (split, rest) = match input.split_first() {
        Some((s, r)) => (*s as usize, r),
        None => return,
    };
    let split = split.min(rest.len());
    let format = match std::str::from_utf8(&rest[..split]) {
        Ok(f) => f,
        Err(_) => return,
    };
    let data = &rest[split..];
    if let Ok((next, _)) = binpacker::unpack(format, data, None) {
        assert!(next <= data.len() + 1);
    }
});

#[cfg(not(fuzzing))]
fn main() {
    eprintln!("Build with: cargo fuzz run unpack_fuzz");
}
