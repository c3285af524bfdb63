use rand::seq::SliceRandom;
use rand::Rng;

pub const PASSWORD_LENGTH: usize = 8;
pub const PASSWORD_DIGITS: usize = 4;

const DIGITS: &[u8] = b"0123456789";
const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Meeting passcode: four digits and four letters in random order, no symbols.
pub fn generate_password() -> String {
    generate_password_with(&mut rand::thread_rng())
}

pub fn generate_password_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut chars: Vec<u8> = Vec::with_capacity(PASSWORD_LENGTH);

    // Sampled without replacement, so no character repeats.
    chars.extend(DIGITS.choose_multiple(rng, PASSWORD_DIGITS));
    chars.extend(LETTERS.choose_multiple(rng, PASSWORD_LENGTH - PASSWORD_DIGITS));
    chars.shuffle(rng);

    chars.into_iter().map(char::from).collect()
}
