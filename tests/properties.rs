use lazyseq::{Error, Seq};
use pollster::block_on;
use proptest::prelude::*;

proptest! {
    #[test]
    fn map_identity_is_a_no_op(values in prop::collection::vec(any::<i64>(), 0..64)) {
        let seq = Seq::of(values.clone());
        let mapped = block_on(seq.map(|x, _, _| Ok::<_, Error>(x)).to_vec()).unwrap();
        prop_assert_eq!(mapped, values);
    }

    #[test]
    fn filter_keeps_the_matching_subsequence(
        values in prop::collection::vec(-100i32..100, 0..64),
        modulus in 1i32..7,
    ) {
        let seq = Seq::of(values.clone()).filter(move |x, _, _| x.rem_euclid(modulus) == 0);
        let expected: Vec<_> = values.into_iter().filter(|x| x.rem_euclid(modulus) == 0).collect();
        prop_assert_eq!(block_on(seq.to_vec()).unwrap(), expected);
    }

    #[test]
    fn slice_matches_vec_slicing(
        values in prop::collection::vec(any::<u8>(), 0..32),
        begin in 0usize..40,
        end in proptest::option::of(0usize..40),
    ) {
        let got = block_on(Seq::of(values.clone()).slice(begin, end).to_vec()).unwrap();

        let stop = end.unwrap_or(values.len()).min(values.len());
        let expected = if begin < stop { values[begin..stop].to_vec() } else { Vec::new() };
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn exit_is_the_prefix_before_the_first_match(
        values in prop::collection::vec(0u8..10, 0..32),
        limit in 0u8..10,
    ) {
        let seq = Seq::of(values.clone());
        let before = block_on(seq.exit(move |x, _, _| *x >= limit).to_vec()).unwrap();
        let through = block_on(seq.exit_after(move |x, _, _| *x >= limit).to_vec()).unwrap();

        let cut = values.iter().position(|x| *x >= limit);
        let expected_before: Vec<_> = values.iter().copied().take_while(|x| *x < limit).collect();
        prop_assert_eq!(&before, &expected_before);
        match cut {
            Some(at) => {
                prop_assert_eq!(through, values[..=at].to_vec());
            }
            None => {
                prop_assert_eq!(through, values);
            }
        }
    }

    #[test]
    fn sort_by_matches_stable_sort(values in prop::collection::vec((0u8..4, any::<u16>()), 0..32)) {
        let got = block_on(Seq::of(values.clone()).sort_by(|a, b| a.0.cmp(&b.0)).to_vec()).unwrap();
        let mut expected = values;
        expected.sort_by(|a, b| a.0.cmp(&b.0));
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn traversals_are_repeatable(values in prop::collection::vec(any::<i16>(), 0..32)) {
        let seq = Seq::of(values).reverse().map(|x, i, _| Ok::<_, Error>((i, x)));
        let first = block_on(seq.to_vec()).unwrap();
        let second = block_on(seq.to_vec()).unwrap();
        prop_assert_eq!(first, second);
    }
}
