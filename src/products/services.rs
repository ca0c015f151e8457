/// Incremental running-average update for a newly submitted rating.
///
/// With no prior reviews the average is the submitted value itself, which
/// also keeps the denominator away from zero.
pub(crate) fn next_rating(current: f64, num_reviews: i64, value: f64) -> f64 {
    if num_reviews <= 0 {
        return value;
    }
    let n = num_reviews as f64;
    (current * n + value) / (n + 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_rating_becomes_the_average() {
        assert_eq!(next_rating(0.0, 0, 4.0), 4.0);
    }

    #[test]
    fn average_moves_toward_new_value() {
        // one 5 on record, a 3 comes in
        assert_eq!(next_rating(5.0, 1, 3.0), 4.0);
        // two reviews averaging 4, a 1 comes in
        assert_eq!(next_rating(4.0, 2, 1.0), 3.0);
    }

    #[test]
    fn sequence_matches_plain_mean() {
        let ratings = [5.0, 3.0, 4.0, 2.0, 5.0];
        let mut avg = 0.0;
        for (i, r) in ratings.iter().enumerate() {
            avg = next_rating(avg, i as i64, *r);
        }
        let mean = ratings.iter().sum::<f64>() / ratings.len() as f64;
        assert!((avg - mean).abs() < 1e-9);
    }
}
