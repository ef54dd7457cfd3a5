mod common;

use common::*;

fn build_args() -> Vec<&'static str> {
    let mut args = vec!["build"];
    args.extend_from_slice(EXAMPLE01_ARGS);
    args
}

#[test]
fn missing_cmake_fails_in_configure() {
    let env = TestEnv::with_example01();
    env.write_project_file("bindkit.toml", "[generator]\ncommand = [\"true\"]\n");

    let result = env.run_with_env(
        &build_args(),
        &[("BINDKIT_CMAKE", "/nonexistent/bindkit-test/cmake")],
    );

    assert_eq!(result.exit_code, 1);
    assert!(
        result.stderr.contains("Error [configure]"),
        "stderr: {}",
        result.stderr
    );
    assert!(result.stderr.contains("could not be started"));
    assert!(!env.project_path("python/py_example01/__init__.py").exists());
}

#[test]
fn failing_generator_stops_before_configure() {
    let env = TestEnv::with_example01();
    env.write_project_file("bindkit.toml", "[generator]\ncommand = [\"false\"]\n");

    let result = env.run(&build_args());

    assert_eq!(result.exit_code, 1);
    assert!(
        result.stderr.contains("Error [generate]"),
        "stderr: {}",
        result.stderr
    );
    assert!(env
        .project_path("python/py_example01/build/litgen_request.json")
        .is_file());
}

#[test]
fn skip_generate_and_build_is_a_scaffold() {
    let env = TestEnv::with_example01();

    let mut args = build_args();
    args.extend_from_slice(&["--skip-generate", "--skip-build"]);
    let result = env.run(&args);

    assert!(result.is_success(), "{}", result.combined_output());
    assert!(result.stdout.contains("py_example01: scaffold in"));
    assert!(env.project_path("python/py_example01/build").is_dir());
}

#[cfg(unix)]
mod toolchain {
    use super::*;

    const FAKE_CMAKE: &str = r#"if [ "$1" = "--build" ]; then
  mkdir -p cmake-build && touch cmake-build/_py_example01.cpython-311-x86_64-linux-gnu.so
fi
exit 0
"#;

    fn project_with_fake_cmake() -> TestEnv {
        let env = TestEnv::with_example01();
        let cmake = env.write_project_script("tools/cmake", FAKE_CMAKE);
        env.write_project_file(
            "bindkit.toml",
            &format!(
                "[toolchain]\ncmake = '{}'\n\n[generator]\ncommand = [\"true\"]\n",
                cmake.display()
            ),
        );
        env
    }

    #[test]
    fn full_build_relocates_extension_and_cleans_up() {
        let env = project_with_fake_cmake();

        let result = env.run(&build_args());

        assert!(result.is_success(), "{}", result.combined_output());
        let artifact = "python/py_example01/_py_example01.cpython-311-x86_64-linux-gnu.so";
        assert!(env.project_path(artifact).is_file());
        assert!(result.stdout.contains(artifact), "stdout: {}", result.stdout);
        assert_eq!(
            env.read_project_file("python/py_example01/__init__.py"),
            "from ._py_example01 import *  # type: ignore # noqa: F403\n"
        );
        assert!(env.project_path("python/py_example01/__init__.pyi").is_file());
        assert!(!env.project_path("python/py_example01/build").exists());
    }

    #[test]
    fn keep_build_leaves_tree_and_rebuild_needs_clean() {
        let env = project_with_fake_cmake();

        let mut args = build_args();
        args.push("--keep-build");
        let first = env.run(&args);
        assert!(first.is_success(), "{}", first.combined_output());
        assert!(env
            .project_path("python/py_example01/build/cmake-build")
            .is_dir());

        let second = env.run(&args);
        assert_eq!(second.exit_code, 1);
        assert!(second.stderr.contains("Error [plan]"), "stderr: {}", second.stderr);

        args.push("--clean");
        let third = env.run(&args);
        assert!(third.is_success(), "{}", third.combined_output());
    }

    #[test]
    fn rebuild_after_clean_run_needs_clean_and_drops_old_artifact() {
        let env = project_with_fake_cmake();
        let first = env.run(&build_args());
        assert!(first.is_success(), "{}", first.combined_output());

        let old = "python/py_example01/_py_example01.cpython-310-x86_64-linux-gnu.so";
        env.write_project_file(old, "");

        let second = env.run(&build_args());
        assert_eq!(second.exit_code, 1);
        assert!(second.stderr.contains("Error [plan]"), "stderr: {}", second.stderr);
        assert!(second.stderr.contains("--clean"));

        let mut args = build_args();
        args.push("--clean");
        let third = env.run(&args);
        assert!(third.is_success(), "{}", third.combined_output());
        assert!(!env.project_path(old).exists());
        assert!(env
            .project_path("python/py_example01/_py_example01.cpython-311-x86_64-linux-gnu.so")
            .is_file());
    }

    #[test]
    fn json_build_reports_commands_and_artifact() {
        let env = project_with_fake_cmake();

        let mut args = build_args();
        args.push("--json");
        let result = env.run(&args);
        assert!(result.is_success(), "{}", result.combined_output());

        let events = result.json_lines();
        let commands: Vec<&str> = events
            .iter()
            .filter(|e| e["event"] == "command")
            .map(|e| e["stage"].as_str().unwrap())
            .collect();
        assert_eq!(commands, vec!["configure", "build"]);
        assert!(events.iter().any(|e| e["event"] == "artifact"));

        let result_line = events.last().unwrap();
        assert_eq!(result_line["modules"][0]["generated"], true);
        assert_eq!(result_line["modules"][0]["build_tree_kept"], false);
    }

    #[test]
    fn build_without_artifact_fails_in_relocate() {
        let env = TestEnv::with_example01();
        let cmake = env.write_project_script("tools/cmake", "exit 0\n");
        env.write_project_file(
            "bindkit.toml",
            &format!(
                "[toolchain]\ncmake = '{}'\n\n[generator]\ncommand = [\"true\"]\n",
                cmake.display()
            ),
        );

        let result = env.run(&build_args());

        assert_eq!(result.exit_code, 1);
        assert!(
            result.stderr.contains("Error [relocate]"),
            "stderr: {}",
            result.stderr
        );
        assert!(!env.project_path("python/py_example01/__init__.py").exists());
    }
}
