//! Module scoping of locations and module images.

use nameenv::classpath::{ClasspathRoot, LocationKind, ModuleDescriptor};
use nameenv::ModuleFilter;

use crate::helpers::classpath_fixtures::Fixture;
use crate::helpers::env_helpers::{binary_text, env_from_roots, qn};

fn two_images(fx: &Fixture) -> Vec<ClasspathRoot> {
    let first = fx.image("jdk1", &[("m1/p/Other.class", "other")]);
    let second = fx.image("jdk2", &[("m2/p/Foo.class", "foo")]);
    vec![ClasspathRoot::binary(first), ClasspathRoot::binary(second)]
}

#[test]
fn test_module_filter_excludes_other_images() {
    let fx = Fixture::new();
    let env = env_from_roots(two_images(&fx));
    assert!(env.locations().iter().all(|l| l.kind() == LocationKind::ModuleImage));

    let m1 = ModuleFilter::module(ModuleDescriptor::new("m1"));
    assert!(env.find_type(&qn("p/Foo"), &m1).is_none());
}

#[test]
fn test_module_filter_selects_serving_image() {
    let fx = Fixture::new();
    let env = env_from_roots(two_images(&fx));

    let m2 = ModuleFilter::module(ModuleDescriptor::new("m2"));
    let answer = env.find_type(&qn("p/Foo"), &m2).unwrap();
    assert_eq!(binary_text(&answer), "foo");
    assert_eq!(answer.module.as_deref(), Some("m2"));

    let answer = env.find_type(&qn("p/Foo"), &ModuleFilter::Any).unwrap();
    assert_eq!(answer.module.as_deref(), Some("m2"));
}

#[test]
fn test_unknown_module_collapses_to_not_found() {
    let fx = Fixture::new();
    let env = env_from_roots(two_images(&fx));
    let filter = ModuleFilter::module(ModuleDescriptor::new("m3"));
    assert!(env.find_type(&qn("p/Foo"), &filter).is_none());
    assert!(!env.is_package("p", &filter));
}

#[test]
fn test_descriptor_package_set_limits_lookup() {
    let fx = Fixture::new();
    let image = fx.image("jdk", &[("m1/p/Foo.class", "foo"), ("m1/q/Bar.class", "bar")]);
    let env = env_from_roots(vec![ClasspathRoot::binary(image)]);

    let filter = ModuleFilter::module(ModuleDescriptor::new("m1").with_packages(["q"]));
    assert!(env.find_type(&qn("p/Foo"), &filter).is_none());
    assert!(env.find_type(&qn("q/Bar"), &filter).is_some());
}

#[test]
fn test_multi_module_filter() {
    let fx = Fixture::new();
    let env = env_from_roots(two_images(&fx));
    let filter =
        ModuleFilter::Modules(vec![ModuleDescriptor::new("m1"), ModuleDescriptor::new("m2")]);
    assert_eq!(binary_text(&env.find_type(&qn("p/Foo"), &filter).unwrap()), "foo");
    assert_eq!(binary_text(&env.find_type(&qn("p/Other"), &filter).unwrap()), "other");
}

#[test]
fn test_packaged_image() {
    let fx = Fixture::new();
    let image = fx.jar("runtime.jimage", &[("java.base/java/lang/Object.class", "object")]);
    let env = env_from_roots(vec![ClasspathRoot::binary(image)]);

    let base = ModuleFilter::module(ModuleDescriptor::new("java.base"));
    let answer = env.find_type(&qn("java/lang/Object"), &base).unwrap();
    assert_eq!(binary_text(&answer), "object");
    assert_eq!(
        answer.binary_type().unwrap().entry.as_deref(),
        Some("java.base/java/lang/Object.class")
    );
    assert!(env.is_package("java/lang", &base));
}

#[test]
fn test_module_scoped_binary_folder() {
    let fx = Fixture::new();
    let bin = fx.dir("bin", &[("p/Foo.class", "foo")]);
    let env = env_from_roots(vec![ClasspathRoot::binary(&bin).in_module("app")]);

    let app = ModuleFilter::module(ModuleDescriptor::new("app"));
    let other = ModuleFilter::module(ModuleDescriptor::new("other"));
    assert!(env.find_type(&qn("p/Foo"), &app).is_some());
    assert!(env.find_type(&qn("p/Foo"), &other).is_none());
    assert!(env.find_type(&qn("p/Foo"), &ModuleFilter::Any).is_some());
}

#[test]
fn test_unscoped_location_serves_every_module() {
    let fx = Fixture::new();
    let bin = fx.dir("bin", &[("p/Foo.class", "foo")]);
    let env = env_from_roots(vec![ClasspathRoot::binary(&bin)]);
    let filter = ModuleFilter::module(ModuleDescriptor::new("anything"));
    assert!(env.find_type(&qn("p/Foo"), &filter).is_some());
}

fn image_then_module_sources(fx: &Fixture) -> Vec<ClasspathRoot> {
    let image = fx.image(
        "jdk",
        &[
            ("m1/p/Other.class", "other"),
            ("m2/p/Container.java", "class Container {} class Baz {}"),
            ("m2/q/B.class", "b"),
        ],
    );
    let src = fx.dir("src", &[("p/Unrelated.java", "class Unrelated {}")]);
    vec![ClasspathRoot::binary(image), ClasspathRoot::source(&src).in_module("m1")]
}

#[test]
fn test_secondary_lookup_stays_inside_requested_module() {
    let fx = Fixture::new();
    let env = env_from_roots(image_then_module_sources(&fx));

    let m1 = ModuleFilter::module(ModuleDescriptor::new("m1"));
    assert!(env.find_type(&qn("p/Baz"), &m1).is_none());

    let answer = env.find_type(&qn("p/Baz"), &ModuleFilter::Any).unwrap();
    assert_eq!(answer.module.as_deref(), Some("m2"));
}

#[test]
fn test_package_query_stays_inside_requested_module() {
    let fx = Fixture::new();
    let env = env_from_roots(image_then_module_sources(&fx));

    let m1 = ModuleFilter::module(ModuleDescriptor::new("m1"));
    let m2 = ModuleFilter::module(ModuleDescriptor::new("m2"));
    assert!(!env.is_package("q", &m1));
    assert!(env.is_package("p", &m1));
    assert!(env.is_package("q", &m2));
    assert!(env.is_package("q", &ModuleFilter::Any));
}

#[test]
fn test_descriptor_package_set_limits_package_query() {
    let fx = Fixture::new();
    let image = fx.image("jdk", &[("m1/p/Foo.class", "foo"), ("m1/q/r/Bar.class", "bar")]);
    let env = env_from_roots(vec![ClasspathRoot::binary(image)]);

    let filter = ModuleFilter::module(ModuleDescriptor::new("m1").with_packages(["q.r"]));
    assert!(!env.is_package("p", &filter));
    assert!(env.is_package("q/r", &filter));
    assert!(env.is_package("q", &filter));
}
