use codefolio_domain::verification::OneTimeCode;
use rand::Rng;

/// Random code drawn uniformly from `[A-Z0-9]`
pub fn generate_code() -> String {
    let mut rng = rand::thread_rng();
    (0..OneTimeCode::LENGTH)
        .map(|_| {
            let idx = rng.gen_range(0..OneTimeCode::ALPHABET.len());
            OneTimeCode::ALPHABET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use codefolio_domain::user::Email;

    #[test]
    fn test_generated_codes_are_valid() {
        let email = Email::parse("a@b.co").unwrap();
        for _ in 0..100 {
            let code = generate_code();
            assert_eq!(code.len(), 6);
            assert!(OneTimeCode::issue(email.clone(), code).is_ok());
        }
    }
}
