use chrono::NaiveDate;
use rand::Rng;

/// Uppercase letters and digits without the easily confused `0 O 1 I`.
const ALPHABET: &[u8; 32] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
const SUFFIX_LEN: usize = 8;

/// `REF-YYYYMMDD-XXXXXXXX`, with 40 random bits from the thread-local CSPRNG.
pub fn generate_booking_reference(date: NaiveDate) -> String {
    generate_with(&mut rand::thread_rng(), date)
}

fn generate_with<R: Rng + ?Sized>(rng: &mut R, date: NaiveDate) -> String {
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| char::from(ALPHABET[rng.gen_range(0..ALPHABET.len())]))
        .collect();
    format!("REF-{}-{}", date.format("%Y%m%d"), suffix)
}
