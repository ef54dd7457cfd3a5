//! Property tests for layout planning.

use std::path::Path;

use proptest::prelude::*;

use bindkit::{Layout, ModuleDescriptor};

fn identifier() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z_][A-Za-z0-9_]{0,15}").unwrap()
}

fn path_component() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z0-9_]{1,8}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Planning twice yields the same layout, and every file lies under the module directory.
    #[test]
    fn property_layout_is_deterministic_and_contained(
        namespace in identifier(),
        module in identifier(),
        parents in proptest::collection::vec(path_component(), 0..=3),
        header in identifier(),
    ) {
        let mut output = parents.join("/");
        if !output.is_empty() {
            output.push('/');
        }
        output.push_str(&module);

        let descriptor = ModuleDescriptor::new(
            namespace.clone(),
            format!("include/{}.h", header),
            format!("src/{}.cpp", header),
            output.clone(),
        );

        let a = Layout::plan(&descriptor).unwrap();
        let b = Layout::plan(&descriptor).unwrap();
        prop_assert_eq!(&a, &b);

        prop_assert_eq!(a.module_name(), module.as_str());
        prop_assert_eq!(a.root_namespace(), namespace.as_str());
        for (role, path) in a.files() {
            prop_assert!(
                path.starts_with(Path::new(&output)),
                "{} at {} escapes {}", role, path.display(), output
            );
        }

        let expected_source = format!("{}.cpp", module);
        prop_assert_eq!(
            a.bindings_source().file_name().and_then(|n| n.to_str()),
            Some(expected_source.as_str())
        );
        prop_assert_eq!(a.init_function_name(), format!("py_init_module_{}", module));
    }

    /// PROPERTY: Module names that are not identifiers never produce a layout.
    #[test]
    fn property_non_identifier_module_is_rejected(
        prefix in identifier(),
        bad in "[-. ]",
        suffix in "[a-z0-9]{1,4}",
    ) {
        let module = format!("{}{}{}", prefix, bad, suffix);
        let descriptor = ModuleDescriptor::new(
            "Example01",
            "Example01.h",
            "Example01.cpp",
            format!("out/{}", module),
        );
        prop_assert!(Layout::plan(&descriptor).is_err());
    }
}
