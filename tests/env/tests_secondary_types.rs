//! Secondary top-level types declared in a differently named file.

use nameenv::classpath::{AccessRule, AccessRuleSet, ClasspathRoot, ModuleDescriptor};
use nameenv::{AnswerKind, EnvironmentOptions, ModuleFilter, SourceUnit};

use crate::helpers::classpath_fixtures::Fixture;
use crate::helpers::env_helpers::{binary_text, env_from_roots, env_with, qn, source_file_name};

#[test]
fn test_secondary_type_found_in_container() {
    let fx = Fixture::new();
    let a = fx.dir(
        "a",
        &[("p/Container.java", "package p;\npublic class Container {}\nclass Baz {}\n")],
    );
    let env = env_from_roots(vec![ClasspathRoot::source(&a)]);

    let answer = env.find_type(&qn("p/Baz"), &ModuleFilter::Any).unwrap();
    assert_eq!(source_file_name(&answer), "Container.java");
    match answer.source_unit().unwrap() {
        SourceUnit::File { main_type, .. } => assert_eq!(main_type, "Container"),
        other => panic!("unexpected unit {other:?}"),
    }
}

#[test]
fn test_nested_and_commented_types_are_not_secondary() {
    let fx = Fixture::new();
    let a = fx.dir(
        "a",
        &[(
            "p/Container.java",
            concat!(
                "class Container {\n",
                "  class Inner {}\n",
                "  // class Commented {}\n",
                "  String s = \"class Quoted {}\";\n",
                "}\n",
            ),
        )],
    );
    let env = env_from_roots(vec![ClasspathRoot::source(&a)]);

    for name in ["p/Inner", "p/Commented", "p/Quoted"] {
        assert!(env.find_type(&qn(name), &ModuleFilter::Any).is_none(), "{name}");
    }
}

#[test]
fn test_primary_answer_anywhere_beats_secondary() {
    let fx = Fixture::new();
    let src = fx.dir("src", &[("p/Container.java", "class Container {} class Baz {}")]);
    let lib = fx.jar("lib.jar", &[("p/Baz.class", "primary")]);
    let env = env_from_roots(vec![ClasspathRoot::source(&src), ClasspathRoot::binary(&lib)]);

    let answer = env.find_type(&qn("p/Baz"), &ModuleFilter::Any).unwrap();
    assert_eq!(binary_text(&answer), "primary");
}

#[test]
fn test_secondary_answer_preferred_over_suggestion() {
    let fx = Fixture::new();
    let src = fx.dir("src", &[("p/Container.java", "class Container {} class Baz {}")]);
    let bin = fx.dir("bin", &[("p/Baz.class", "advisory")]);
    let rules = AccessRuleSet::new(vec![AccessRule::discouraged("**").ignoring_if_better()], "bin");
    let env = env_from_roots(vec![
        ClasspathRoot::source(&src),
        ClasspathRoot::binary(&bin).with_access_rules(rules),
    ]);

    let answer = env.find_type(&qn("p/Baz"), &ModuleFilter::Any).unwrap();
    assert_eq!(source_file_name(&answer), "Container.java");
}

#[test]
fn test_secondary_lookup_searches_archives_after_source_dirs() {
    let fx = Fixture::new();
    let src = fx.dir("src", &[("p/Unrelated.java", "class Unrelated {}")]);
    let lib = fx.jar(
        "lib-sources.jar",
        &[("p/Container.java", "class Container {} class Baz {}")],
    );
    let env = env_from_roots(vec![ClasspathRoot::source(&src), ClasspathRoot::binary(&lib)]);

    let answer = env.find_type(&qn("p/Baz"), &ModuleFilter::Any).unwrap();
    match &answer.kind {
        AnswerKind::Source(SourceUnit::ArchiveEntry { entry, contents, .. }) => {
            assert_eq!(entry, "p/Container.java");
            assert!(contents.contains("class Baz"));
        }
        other => panic!("expected archive source entry, got {other:?}"),
    }
}

#[test]
fn test_secondary_lookup_disabled() {
    let fx = Fixture::new();
    let a = fx.dir("a", &[("p/Container.java", "class Container {} class Baz {}")]);
    let env = env_with(
        vec![ClasspathRoot::source(&a)],
        Vec::new(),
        EnvironmentOptions::default().with_secondary_types(false),
    );
    assert!(env.find_type(&qn("p/Baz"), &ModuleFilter::Any).is_none());
}

#[test]
fn test_secondary_lookup_for_single_module_uses_first_serving_location() {
    let fx = Fixture::new();
    let m1 = fx.dir("m1", &[("p/Other.java", "class Other {}")]);
    let m2 = fx.dir("m2", &[("p/Container.java", "class Container {} class Baz {}")]);
    let env = env_from_roots(vec![
        ClasspathRoot::source(&m1).in_module("m1"),
        ClasspathRoot::source(&m2).in_module("m2"),
    ]);

    let only_m1 = ModuleFilter::module(ModuleDescriptor::new("m1"));
    assert!(env.find_type(&qn("p/Baz"), &only_m1).is_none());

    let only_m2 = ModuleFilter::module(ModuleDescriptor::new("m2"));
    let answer = env.find_type(&qn("p/Baz"), &only_m2).unwrap();
    assert_eq!(source_file_name(&answer), "Container.java");

    assert!(env.find_type(&qn("p/Baz"), &ModuleFilter::Any).is_some());
}

#[test]
fn test_secondary_lookup_honours_descriptor_packages() {
    let fx = Fixture::new();
    let src = fx.dir("src", &[("p/Container.java", "class Container {} class Baz {}")]);
    let env = env_from_roots(vec![ClasspathRoot::source(&src).in_module("app")]);

    let elsewhere = ModuleFilter::module(ModuleDescriptor::new("app").with_packages(["q"]));
    assert!(env.find_type(&qn("p/Baz"), &elsewhere).is_none());

    let served = ModuleFilter::module(ModuleDescriptor::new("app").with_packages(["p"]));
    let answer = env.find_type(&qn("p/Baz"), &served).unwrap();
    assert_eq!(source_file_name(&answer), "Container.java");
}

#[test]
fn test_multi_module_secondary_lookup_skips_unlisted_modules() {
    let fx = Fixture::new();
    let image = fx.image(
        "jdk",
        &[
            ("m1/p/Container.java", "class Container {} class Baz {}"),
            ("m3/p/Holder.java", "class Holder {} class Qux {}"),
        ],
    );
    let src = fx.dir("src", &[("p/Unrelated.java", "class Unrelated {}")]);
    let env = env_from_roots(vec![ClasspathRoot::source(&src), ClasspathRoot::binary(image)]);

    let filter =
        ModuleFilter::Modules(vec![ModuleDescriptor::new("m1"), ModuleDescriptor::new("m2")]);
    let answer = env.find_type(&qn("p/Baz"), &filter).unwrap();
    assert_eq!(answer.module.as_deref(), Some("m1"));
    assert!(env.find_type(&qn("p/Qux"), &filter).is_none());
}
