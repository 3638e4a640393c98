use nanofilt::{average_quality, FilterConfig, Record, StreamFilter};
use proptest::prelude::*;

fn read_strategy() -> impl Strategy<Value = (Vec<u8>, Vec<u8>)> {
    (0usize..200).prop_flat_map(|len| {
        (
            prop::collection::vec(prop::sample::select(b"ACGTNacgt".to_vec()), len),
            prop::collection::vec(b'!'..=b'~', len),
        )
    })
}

fn config(min_length: usize, min_quality: f64, gc: (f64, f64), crop: (usize, usize)) -> FilterConfig {
    FilterConfig::builder()
        .min_length(min_length)
        .min_quality(min_quality)
        .min_gc(gc.0)
        .max_gc(gc.1)
        .headcrop(Some(crop.0))
        .tailcrop(Some(crop.1))
        .build()
        .unwrap()
}

fn gc_band() -> impl Strategy<Value = (f64, f64)> {
    (0.0f64..=1.0, 0.0f64..=1.0).prop_map(|(a, b)| (a.min(b), a.max(b)))
}

proptest! {
    #[test]
    fn average_matches_error_probability_formula(scores in prop::collection::vec(0u8..=93, 1..300)) {
        let mean = scores.iter().map(|&q| 10f64.powf(-(q as f64) / 10.0)).sum::<f64>()
            / scores.len() as f64;
        let expected = -10.0 * mean.log10();
        let actual = average_quality(&scores).unwrap();
        prop_assert!((actual - expected).abs() < 1e-9);
    }

    #[test]
    fn average_of_uniform_scores_is_the_score(v in 0u8..=93, len in 1usize..500) {
        let actual = average_quality(&vec![v; len]).unwrap();
        prop_assert!((actual - v as f64).abs() < 1e-9);
    }

    #[test]
    fn average_never_exceeds_arithmetic_mean(scores in prop::collection::vec(0u8..=93, 1..300)) {
        let arithmetic = scores.iter().map(|&q| q as f64).sum::<f64>() / scores.len() as f64;
        prop_assert!(average_quality(&scores).unwrap() <= arithmetic + 1e-9);
    }

    #[test]
    fn decision_is_repeatable(
        (seq, qual) in read_strategy(),
        min_length in 0usize..100,
        min_quality in 0.0f64..40.0,
        gc in gc_band(),
        crop in (0usize..30, 0usize..30),
    ) {
        let filter = StreamFilter::new(&config(min_length, min_quality, gc, crop));
        let record = Record::new(b"r", None, &seq, &qual);
        prop_assert_eq!(filter.evaluate(&record), filter.evaluate(&record));
    }

    #[test]
    fn cropped_length_is_exact(
        (seq, qual) in read_strategy(),
        crop in (0usize..250, 0usize..250),
    ) {
        let filter = StreamFilter::new(&config(0, -1.0, (0.0, 1.0), crop));
        let record = Record::new(b"r", None, &seq, &qual);
        if let Some(kept) = filter.evaluate(&record) {
            prop_assert_eq!(kept.len(), seq.len().saturating_sub(crop.0 + crop.1));
            prop_assert_eq!(kept.seq.len(), kept.qual.len());
        }
        let cropped = record.crop(nanofilt::Crop::new(Some(crop.0), Some(crop.1)));
        prop_assert_eq!(cropped.len(), seq.len().saturating_sub(crop.0 + crop.1));
        prop_assert_eq!(cropped.seq.len(), cropped.qual.len());
    }

    #[test]
    fn stricter_settings_never_admit_more(
        (seq, qual) in read_strategy(),
        min_length in 0usize..100,
        extra_length in 0usize..100,
        min_quality in 0.0f64..40.0,
        extra_quality in 0.0f64..20.0,
        gc in gc_band(),
        narrowing in (0.0f64..=1.0, 0.0f64..=1.0),
        crop in (0usize..30, 0usize..30),
    ) {
        let width = gc.1 - gc.0;
        let narrow_min = gc.0 + width * narrowing.0.min(narrowing.1);
        let narrow_max = gc.0 + width * narrowing.0.max(narrowing.1);

        let loose = StreamFilter::new(&config(min_length, min_quality, gc, crop));
        let strict = StreamFilter::new(&config(
            min_length + extra_length,
            min_quality + extra_quality,
            (narrow_min.min(gc.1), narrow_max.min(gc.1)),
            crop,
        ));
        let record = Record::new(b"r", None, &seq, &qual);
        if strict.passes(&record) {
            prop_assert!(loose.passes(&record));
        }
    }
}
