//! Property tests for the routing round-trip laws over arbitrary paths.
//!
//! Run with: `cargo test --test routing_laws`

use ganglio_site::locale::LocaleRegistry;
use ganglio_site::routing::{alternates, canonicalize, localize, resolve_locale};
use proptest::prelude::*;

fn registry() -> LocaleRegistry {
    LocaleRegistry::stock()
}

/// Path-like strings biased towards locale codes, so stacked and bare
/// prefixes come up often.
fn path_strategy() -> impl Strategy<Value = String> {
    let segment = prop_oneof![
        Just("en".to_string()),
        Just("sv".to_string()),
        Just("ar".to_string()),
        Just("pt".to_string()),
        Just("xx".to_string()),
        Just(String::new()),
        "[a-z0-9-]{1,12}",
    ];
    (
        any::<bool>(),
        prop::collection::vec(segment, 0..6),
        any::<bool>(),
        prop::option::of("[?#][a-z=&]{0,8}"),
    )
        .prop_map(|(leading, segments, trailing, suffix)| {
            let mut path = segments.join("/");
            if leading {
                path.insert(0, '/');
            }
            if trailing {
                path.push('/');
            }
            if let Some(suffix) = suffix {
                path.push_str(&suffix);
            }
            path
        })
}

fn locale_index() -> impl Strategy<Value = usize> {
    0..registry().len()
}

proptest! {
    #[test]
    fn canonicalize_undoes_localize(path in path_strategy(), idx in locale_index()) {
        let registry = registry();
        let locale = registry.iter().nth(idx).unwrap();
        prop_assert_eq!(
            canonicalize(&registry, &localize(&registry, &path, locale)),
            canonicalize(&registry, &path)
        );
    }

    #[test]
    fn localize_is_idempotent(path in path_strategy(), idx in locale_index()) {
        let registry = registry();
        let locale = registry.iter().nth(idx).unwrap();
        let once = localize(&registry, &path, locale);
        prop_assert_eq!(localize(&registry, &once, locale), once);
    }

    #[test]
    fn default_locale_is_canonical(path in path_strategy()) {
        let registry = registry();
        prop_assert_eq!(
            localize(&registry, &path, registry.default_locale()),
            canonicalize(&registry, &path)
        );
    }

    #[test]
    fn non_default_locales_are_prefixed(path in path_strategy(), idx in 1..registry().len()) {
        let registry = registry();
        let locale = registry.iter().nth(idx).unwrap();
        prop_assert!(!registry.is_default(locale.code()));
        let localized = localize(&registry, &path, locale);
        let prefix = format!("/{}/", locale.code());
        prop_assert!(localized.starts_with(&prefix), "{} lacks {}", localized, prefix);
    }

    #[test]
    fn canonicalize_is_idempotent(path in path_strategy()) {
        let registry = registry();
        let once = canonicalize(&registry, &path);
        prop_assert_eq!(canonicalize(&registry, &once), once);
    }

    #[test]
    fn localized_path_resolves_to_its_locale(path in path_strategy(), idx in locale_index()) {
        let registry = registry();
        let locale = registry.iter().nth(idx).unwrap();
        let localized = localize(&registry, &path, locale);
        prop_assert_eq!(resolve_locale(&registry, &localized).code(), locale.code());
    }

    #[test]
    fn output_is_absolute_and_clean(path in path_strategy(), idx in locale_index()) {
        let registry = registry();
        let locale = registry.iter().nth(idx).unwrap();
        let localized = localize(&registry, &path, locale);
        prop_assert!(localized.starts_with('/'));
        prop_assert!(!localized.contains("//"));
        prop_assert!(!localized.contains(['?', '#']));
    }

    #[test]
    fn alternates_cover_registry_once(path in "\\PC{0,40}") {
        let registry = registry();
        let alts = alternates(&registry, &path);
        prop_assert_eq!(alts.len(), registry.len());
        for (alt, locale) in alts.iter().zip(registry.iter()) {
            prop_assert_eq!(alt.code.as_str(), locale.code());
            prop_assert_eq!(canonicalize(&registry, &alt.path), alts.canonical());
        }
    }
}
