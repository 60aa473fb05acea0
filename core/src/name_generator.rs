//! Deterministic guest name generation from curated name lists.
//!
//! Same RNG seed = same names.

use crate::rng::HotelRng;

pub struct NameGenerator;

impl NameGenerator {
    /// Generate a full name (first + last) deterministically.
    pub fn generate_full_name(rng: &mut HotelRng) -> String {
        let first_name = Self::generate_first_name(rng);
        let last_name = Self::generate_last_name(rng);
        format!("{} {}", first_name, last_name)
    }

    pub fn generate_first_name(rng: &mut HotelRng) -> &'static str {
        let names = Self::first_names();
        names[rng.next_u64_below(names.len() as u64) as usize]
    }

    pub fn generate_last_name(rng: &mut HotelRng) -> &'static str {
        let names = Self::last_names();
        names[rng.next_u64_below(names.len() as u64) as usize]
    }

    fn first_names() -> &'static [&'static str] {
        &[
            "John", "Mary", "David", "Sarah", "Michael", "Emma", "James", "Lisa",
            "Robert", "Anna", "Peter", "Julia", "Thomas", "Eva", "Daniel", "Nora",
            "Gabor", "Zsofia", "Mark", "Lilla", "Adam", "Kata", "Balazs", "Reka",
            "Oliver", "Sophie", "Lucas", "Mia", "Henry", "Clara", "Felix", "Ida",
            "Victor", "Alice", "Samuel", "Rosa", "Leo", "Hanna", "Oscar", "Vera",
        ]
    }

    fn last_names() -> &'static [&'static str] {
        &[
            "Smith", "Nagy", "Kovacs", "Toth", "Szabo", "Horvath", "Varga", "Kiss",
            "Molnar", "Nemeth", "Farkas", "Balogh", "Brown", "Miller", "Wilson", "Moore",
            "Taylor", "Anderson", "Clark", "Lewis", "Walker", "Young", "King", "Wright",
            "Schmidt", "Weber", "Fischer", "Rossi", "Bianchi", "Novak", "Dubois", "Laurent",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::RngStream;

    #[test]
    fn name_generation_is_deterministic() {
        let mut rng1 = HotelRng::new(12345, RngStream::Names);
        let mut rng2 = HotelRng::new(12345, RngStream::Names);

        for _ in 0..20 {
            assert_eq!(
                NameGenerator::generate_full_name(&mut rng1),
                NameGenerator::generate_full_name(&mut rng2),
                "Same seed should produce same name"
            );
        }
    }

    #[test]
    fn generates_valid_full_names() {
        let mut rng = HotelRng::new(12345, RngStream::Names);

        for _ in 0..100 {
            let name = NameGenerator::generate_full_name(&mut rng);
            let parts: Vec<&str> = name.split_whitespace().collect();
            assert_eq!(parts.len(), 2, "Name should have exactly 2 parts: {}", name);
        }
    }
}
