use proptest::prelude::*;
use skyglass::domain::{
    pagination::{HOURLY_PAGE_SIZE, HourlyPager},
    presentation::{background_key_at_hour, condition_text, icon_key},
    query::is_valid_input,
    weather::{Units, convert_temp, round_temp},
};

proptest! {
    #[test]
    fn every_code_has_text_and_assets(code in any::<u8>(), hour in 0u32..24, day in any::<bool>()) {
        prop_assert!(!condition_text(code).is_empty());
        prop_assert!(icon_key(code, day).ends_with(".svg"));
        prop_assert!(background_key_at_hour(code, hour).ends_with(".png"));
    }

    #[test]
    fn fahrenheit_conversion_is_linear(celsius in -90.0f64..60.0) {
        let f = convert_temp(celsius, Units::Fahrenheit);
        prop_assert!((f - (celsius * 1.8 + 32.0)).abs() < 1e-9);
        prop_assert_eq!(convert_temp(celsius, Units::Celsius), celsius);
        prop_assert!((f64::from(round_temp(celsius)) - celsius).abs() <= 0.5);
    }

    #[test]
    fn validation_never_accepts_digits(prefix in "[a-zA-Z ]{0,8}", digit in 0u8..10) {
        let query = format!("{prefix}{digit}");
        prop_assert!(!is_valid_input(&query));
    }

    #[test]
    fn letters_and_separators_are_accepted(query in "[a-zA-Z]{2}[a-zA-Z ,.-]{0,20}") {
        prop_assert!(is_valid_input(&query));
    }

    #[test]
    fn pager_window_stays_in_bounds(total in 0usize..80, steps in proptest::collection::vec(any::<bool>(), 0..30)) {
        let mut pager = HourlyPager::new(total);
        for forward in steps {
            if forward { pager.next() } else { pager.prev() }
            let window = pager.visible();
            prop_assert!(window.end <= total);
            prop_assert!(window.len() <= HOURLY_PAGE_SIZE);
            prop_assert!(pager.page() < pager.page_count().max(1));
        }
    }
}
