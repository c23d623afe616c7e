pub mod bucket;
pub mod config;
pub mod frequency;
pub mod generator;
pub mod pairs;
pub mod patterns;
pub mod position;
pub mod report;
pub mod transition;

#[cfg(test)]
pub(crate) fn make_test_history(n: usize) -> sayisal_data::models::DrawHistory {
    use sayisal_data::models::{Draw, DrawHistory};

    const OFFSETS: [usize; 6] = [0, 3, 17, 31, 52, 66];
    let draws = (0..n)
        .map(|i| {
            let mut numbers = [0u8; 6];
            for (slot, off) in OFFSETS.iter().enumerate() {
                numbers[slot] = ((i * 7 + off) % 90 + 1) as u8;
            }
            Draw::new(numbers)
        })
        .collect();
    DrawHistory::from_chronological(draws)
}
