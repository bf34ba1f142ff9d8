//! Location set construction, merging and cleanup.

use std::collections::HashMap;

use nameenv::classpath::{AccessRule, AccessRuleSet, ClasspathRoot, LocationKind, LocationSet};
use nameenv::{EnvironmentOptions, ModuleFilter, NameEnvironment};

use crate::helpers::classpath_fixtures::Fixture;
use crate::helpers::env_helpers::{binary_text, env_from_roots, qn};

fn kinds(env: &NameEnvironment) -> Vec<LocationKind> {
    env.locations().iter().map(|l| l.kind()).collect()
}

#[test]
fn test_roots_are_classified() {
    let fx = Fixture::new();
    let src = fx.dir("src", &[("p/Foo.java", "class Foo {}")]);
    let bin = fx.dir("bin", &[("p/Foo.class", "foo")]);
    let jar = fx.jar("lib.jar", &[("p/Foo.class", "foo")]);
    let zip = fx.jar("more.ZIP", &[("p/Foo.class", "foo")]);
    let image = fx.image("jdk", &[("m/p/Foo.class", "foo")]);

    let env = env_from_roots(vec![
        ClasspathRoot::source(&src),
        ClasspathRoot::binary(&bin),
        ClasspathRoot::binary(&jar),
        ClasspathRoot::source(&zip),
        ClasspathRoot::binary(&image),
    ]);
    assert_eq!(
        kinds(&env),
        vec![
            LocationKind::SourceDirectory,
            LocationKind::BinaryFolder,
            LocationKind::Archive,
            LocationKind::Archive,
            LocationKind::ModuleImage,
        ]
    );
}

#[test]
fn test_unopenable_roots_are_skipped() {
    let fx = Fixture::new();
    let bad = fx.corrupt_jar("bad.jar");
    let missing = fx.path("missing");
    let good = fx.dir("good", &[("p/Foo.class", "good")]);

    let env = env_from_roots(vec![
        ClasspathRoot::binary(&bad),
        ClasspathRoot::binary(&missing),
        ClasspathRoot::binary(&good),
    ]);
    assert_eq!(env.locations().len(), 1);
    assert_eq!(binary_text(&env.find_type(&qn("p/Foo"), &ModuleFilter::Any).unwrap()), "good");
}

#[test]
fn test_exact_duplicates_are_dropped() {
    let fx = Fixture::new();
    let bin = fx.dir("bin", &[("p/Foo.class", "foo")]);
    let rules = AccessRuleSet::new(vec![AccessRule::forbidden("**")], "bin");

    let env = env_from_roots(vec![
        ClasspathRoot::binary(&bin),
        ClasspathRoot::binary(&bin),
        ClasspathRoot::binary(&bin).with_access_rules(rules),
    ]);
    // Same root with different rules is a distinct location.
    assert_eq!(env.locations().len(), 2);
}

#[test]
fn test_jar_handles_are_shared_per_session() {
    let fx = Fixture::new();
    let jar = fx.jar("lib.jar", &[("p/Foo.class", "foo")]);
    let rules = AccessRuleSet::new(vec![AccessRule::discouraged("**")], "lib");

    let env = env_from_roots(vec![
        ClasspathRoot::binary(&jar),
        ClasspathRoot::binary(&jar).with_access_rules(rules),
    ]);
    assert_eq!(env.locations().len(), 2);
    assert_eq!(env.locations().archives().len(), 1);
}

#[test]
fn test_merge_appends_dependency_roots() {
    let fx = Fixture::new();
    let app = fx.dir("app", &[("p/Foo.class", "app")]);
    let dep = fx.dir("dep", &[("p/Foo.class", "dep"), ("q/Bar.class", "bar")]);

    let mut projects: HashMap<String, Vec<ClasspathRoot>> = HashMap::new();
    projects.insert("app".into(), vec![ClasspathRoot::binary(&app)]);
    projects.insert(
        "dep".into(),
        vec![ClasspathRoot::binary(&dep), ClasspathRoot::binary(&app)],
    );

    let options = EnvironmentOptions::default();
    let mut env = NameEnvironment::for_project(&projects, "app", Vec::new(), options);
    assert!(env.find_type(&qn("q/Bar"), &ModuleFilter::Any).is_none());

    assert_eq!(env.add_project_classpath(&projects, "dep"), 1);
    assert_eq!(env.locations().len(), 2);
    assert_eq!(binary_text(&env.find_type(&qn("p/Foo"), &ModuleFilter::Any).unwrap()), "app");
    assert_eq!(binary_text(&env.find_type(&qn("q/Bar"), &ModuleFilter::Any).unwrap()), "bar");

    assert_eq!(env.add_project_classpath(&projects, "unknown"), 0);
}

#[test]
fn test_unknown_project_yields_empty_environment() {
    let projects: HashMap<String, Vec<ClasspathRoot>> = HashMap::new();
    let options = EnvironmentOptions::default();
    let env = NameEnvironment::for_project(&projects, "ghost", Vec::new(), options);
    assert!(env.locations().is_empty());
    assert!(env.find_type(&qn("p/Foo"), &ModuleFilter::Any).is_none());
}

#[test]
fn test_cleanup_releases_everything() {
    let fx = Fixture::new();
    let jar = fx.jar("lib.jar", &[("p/Foo.class", "foo")]);
    let mut env = env_from_roots(vec![ClasspathRoot::binary(&jar)]);
    assert!(env.find_type(&qn("p/Foo"), &ModuleFilter::Any).is_some());

    env.cleanup();
    assert!(env.locations().is_empty());
    assert!(env.locations().archives().is_empty());
    assert!(env.find_type(&qn("p/Foo"), &ModuleFilter::Any).is_none());
}

#[test]
fn test_custom_archive_extensions() {
    let fx = Fixture::new();
    let bundle = fx.jar("lib.bundle", &[("p/Foo.class", "foo")]);
    let options = EnvironmentOptions::default().with_archive_extensions(["bundle"]);
    let locations =
        LocationSet::build([ClasspathRoot::binary(&bundle)], &options.archive_extensions);
    assert_eq!(locations.iter().next().map(|l| l.kind()), Some(LocationKind::Archive));

    let default_locations = LocationSet::build(
        [ClasspathRoot::binary(&bundle)],
        &EnvironmentOptions::default().archive_extensions,
    );
    assert!(default_locations.is_empty());
}
