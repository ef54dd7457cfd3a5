//! Property tests for composition and post-generation checks.

use std::path::Path;

use proptest::prelude::*;

use bindkit::domain::services::composer::{
    compose_source, compose_stub, init_block_open, INIT_BLOCK_CLOSE, NAMESPACE_ALIAS,
    SOURCE_PREAMBLE, SOURCE_REGIONS, STUB_PREAMBLE,
};
use bindkit::domain::services::verify_generated;
use bindkit::domain::entities::RegionSpan;
use bindkit::{BindkitError, ComposedDocument, RegionKind};

fn text_line() -> impl Strategy<Value = String> {
    // No angle brackets, so generated text can never spell a marker tag.
    proptest::string::string_regex("[A-Za-z0-9 _;:(){}=+*/#\\-]{0,40}").unwrap()
}

fn text_block() -> impl Strategy<Value = String> {
    proptest::collection::vec(text_line(), 0..=8).prop_map(|lines| {
        lines
            .into_iter()
            .map(|l| format!("{}\n", l))
            .collect::<String>()
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: The fixed text of a composed source is preamble, alias, the original verbatim and the init block.
    #[test]
    fn property_source_fixed_text_keeps_original(original in text_block()) {
        let doc = compose_source(&original, "py_example01").unwrap();
        let fixed = doc.fixed_text();

        let head = format!("{}{}{}", SOURCE_PREAMBLE, NAMESPACE_ALIAS, original);
        prop_assert!(fixed.starts_with(&head));
        prop_assert!(fixed.contains(&init_block_open("py_example01")));
        prop_assert!(fixed.ends_with(INIT_BLOCK_CLOSE));
        prop_assert_eq!(doc.region_kinds(), SOURCE_REGIONS.to_vec());
    }

    /// PROPERTY: Whatever the generator writes inside the regions passes verification and parses back.
    #[test]
    fn property_filled_regions_verify(
        original in text_block(),
        glue in text_block(),
        pydef in text_block(),
        stub in text_block(),
    ) {
        let skeleton = compose_source(&original, "py_example01").unwrap();
        let mut filled = skeleton.clone();
        filled.replace_region(RegionKind::GlueCode, glue.clone()).unwrap();
        filled.replace_region(RegionKind::Pydef, pydef.clone()).unwrap();

        let parsed = verify_generated(Path::new("bindings.cpp"), &skeleton, &filled.render()).unwrap();
        prop_assert_eq!(parsed.region(RegionKind::GlueCode), Some(glue.as_str()));
        prop_assert_eq!(parsed.region(RegionKind::Pydef), Some(pydef.as_str()));

        let stub_skeleton = compose_stub().unwrap();
        let mut stub_filled = stub_skeleton.clone();
        stub_filled.replace_region(RegionKind::Stub, stub.clone()).unwrap();
        let parsed = verify_generated(Path::new("__init__.pyi"), &stub_skeleton, &stub_filled.render()).unwrap();
        prop_assert_eq!(parsed.region(RegionKind::Stub), Some(stub.as_str()));
        prop_assert!(stub_filled.render().starts_with(STUB_PREAMBLE));
    }

    /// PROPERTY: Appending text after the last region is always reported as an integrity error.
    #[test]
    fn property_edit_outside_regions_is_detected(
        original in text_block(),
        extra in "[A-Za-z0-9_]{1,20}",
    ) {
        let skeleton = compose_source(&original, "py_example01").unwrap();
        let tampered = format!("{}\n// {}\n", skeleton.render(), extra);

        let err = verify_generated(Path::new("bindings.cpp"), &skeleton, &tampered).unwrap_err();
        let is_integrity = matches!(err, BindkitError::Integrity { .. });
        prop_assert!(is_integrity);
    }

    /// PROPERTY: A source that already spells any begin or end tag is rejected.
    #[test]
    fn property_marked_source_is_rejected(
        before in text_block(),
        after in text_block(),
        kind in prop::sample::select(RegionKind::ALL.to_vec()),
        closing in any::<bool>(),
    ) {
        let tag = if closing { kind.end_tag() } else { kind.begin_tag() };
        let original = format!("{}// {}\n{}", before, tag, after);

        prop_assert!(compose_source(&original, "py_example01").is_err());
    }

    /// PROPERTY: Rendering then parsing a composed document is the identity.
    #[test]
    fn property_render_parse_identity(original in text_block()) {
        let doc = compose_source(&original, "py_example01").unwrap();
        let parsed = ComposedDocument::parse(&doc.render(), &SOURCE_REGIONS).unwrap();
        prop_assert_eq!(parsed.fixed_segments(), doc.fixed_segments());
        prop_assert_eq!(parsed.render(), doc.render());
    }

    /// PROPERTY: Locating regions gives the same spans in any order, and parsing in reverse order agrees.
    #[test]
    fn property_region_location_is_order_independent(
        original in text_block(),
        glue in text_block(),
        pydef in text_block(),
    ) {
        let mut doc = compose_source(&original, "py_example01").unwrap();
        doc.replace_region(RegionKind::GlueCode, glue).unwrap();
        doc.replace_region(RegionKind::Pydef, pydef).unwrap();
        let text = doc.render();

        let pydef_first = RegionSpan::locate(&text, RegionKind::Pydef).unwrap();
        let glue_second = RegionSpan::locate(&text, RegionKind::GlueCode).unwrap();
        prop_assert_eq!(&glue_second, &RegionSpan::locate(&text, RegionKind::GlueCode).unwrap());
        prop_assert_eq!(&pydef_first, &RegionSpan::locate(&text, RegionKind::Pydef).unwrap());
        prop_assert!(glue_second.end_line.end <= pydef_first.begin_line.start);

        let forward = ComposedDocument::parse(&text, &[RegionKind::GlueCode, RegionKind::Pydef]).unwrap();
        let reverse = ComposedDocument::parse(&text, &[RegionKind::Pydef, RegionKind::GlueCode]).unwrap();
        prop_assert_eq!(forward, reverse);
    }
}
