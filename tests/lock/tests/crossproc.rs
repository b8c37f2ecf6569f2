//! Cross-process determinism: the fixture binary prints identical output
//! under different working directories, locales, noise variables and log
//! levels.

use std::process::Command;

use lock_tests::fixture_helpers::fixtures_dir;

fn run_variant(work_dir: &str, args: &[&str], env_overrides: &[(&str, &str)]) -> String {
    let bin = env!("CARGO_BIN_EXE_kstar_fixture");

    let mut command = Command::new(bin);
    command.current_dir(work_dir).args(args);

    command
        .env_remove("LC_ALL")
        .env_remove("LC_COLLATE")
        .env_remove("LANG")
        .env_remove("LANGUAGE")
        .env_remove("RUST_LOG");

    for &(key, val) in env_overrides {
        command.env(key, val);
    }

    let output = command.output().unwrap_or_else(|e| {
        panic!("failed to spawn {bin} (work_dir={work_dir}, overrides={env_overrides:?}): {e}")
    });

    assert!(
        output.status.success(),
        "kstar_fixture exited with {}: stderr={}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );

    String::from_utf8(output.stdout).expect("stdout is valid UTF-8")
}

fn assert_stable(graph: &str, k: &str) -> String {
    let root = env!("CARGO_MANIFEST_DIR");
    let path = fixtures_dir().join(format!("{graph}.graph"));
    let path = path.to_string_lossy();
    let args = [path.as_ref(), k];
    let baseline = run_variant(root, &args, &[]);

    let alt_cwd = if cfg!(target_os = "windows") {
        "C:\\"
    } else {
        "/tmp"
    };
    assert_eq!(
        baseline,
        run_variant(alt_cwd, &args, &[]),
        "{graph}: output differs when cwd changes from {root} to {alt_cwd}"
    );
    assert_eq!(
        baseline,
        run_variant(root, &args, &[("LC_ALL", "C"), ("LANG", "C")]),
        "{graph}: output differs when LC_ALL=C LANG=C"
    );
    assert_eq!(
        baseline,
        run_variant(
            root,
            &args,
            &[("KSTAR_NOISE", "should_not_matter"), ("TZ", "America/New_York")],
        ),
        "{graph}: output differs with spurious env vars"
    );
    assert_eq!(
        baseline,
        run_variant(root, &args, &[("RUST_LOG", "trace")]),
        "{graph}: output differs with trace logging on"
    );
    baseline
}

#[test]
fn diamond_output_is_stable_and_complete() {
    let out = assert_stable("diamond", "5");
    assert!(out.contains("name=diamond.5\n"), "{out}");
    assert!(out.contains("path_count=4\n"), "{out}");
    assert!(out.contains("path_0_cost=3\n"), "{out}");
    assert!(out.contains("path_0_edges=0->1#0,1->2#0,2->3#0\n"), "{out}");
    assert!(out.contains("path_3_cost=9\n"), "{out}");
    assert!(
        out.contains(
            "report_digest=sha256:4a80d3dae5c533d58bfb9129e300a700db992dd47dad770bfee7a37b23977200"
        ),
        "{out}"
    );
}

#[test]
fn grid_output_is_stable() {
    let out = assert_stable("grid", "10");
    assert!(out.contains("path_count=6\n"), "{out}");
}

#[test]
fn inconsistent_output_is_stable() {
    let out = assert_stable("inconsistent", "4");
    assert!(out.contains("path_0_cost=7.5\n"), "{out}");
    assert!(out.contains("path_count=2\n"), "{out}");
}

#[test]
fn unreachable_output_has_no_paths() {
    let out = assert_stable("unreachable", "3");
    assert!(out.contains("path_count=0\n"), "{out}");
    assert!(!out.contains("path_0_"), "{out}");
}

#[test]
fn simple_flag_filters_loops() {
    let root = env!("CARGO_MANIFEST_DIR");
    let path = fixtures_dir().join("loop.graph");
    let path = path.to_string_lossy();
    let out = run_variant(root, &[path.as_ref(), "2", "--simple"], &[]);
    assert!(out.contains("path_0_cost=2\n"), "{out}");
    assert!(out.contains("path_1_cost=5\n"), "{out}");
}
