//! Integration tests for code_management_class_loading

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use code_management_class_loading::{
    ArchiveLoadError, ArchivePolicy, BuiltinClasses, ClassFile, ClassOrigin, ClassRuntime,
    LoadingContext, NativeTable,
};
use entities_class_model::{
    Argument, MethodDescriptor, NativeClass, ParamType, QualifiedName,
};
use infrastructure_archive::{ArchiveHandle, ArchiveLocation, ArchiveWriter, Compression};

fn name(s: &str) -> QualifiedName {
    QualifiedName::parse(s).unwrap()
}

fn write_archive(dir: &std::path::Path, file: &str, classes: &[ClassFile]) -> ArchiveHandle {
    let mut writer = ArchiveWriter::new();
    for class in classes {
        writer.add_class(&name(&class.name), &class.encode().unwrap(), Compression::Deflated);
    }
    let path = dir.join(file);
    writer.write_to(&path).unwrap();
    ArchiveHandle::open(ArchiveLocation::from_path(path)).unwrap()
}

#[test]
fn test_archive_classes_invoke_natives() {
    let dir = tempfile::tempdir().unwrap();
    let seen = Arc::new(Mutex::new(Vec::<String>::new()));
    let sink = Arc::clone(&seen);

    let natives = Arc::new(NativeTable::new());
    natives.register_method("greeter_load", move |arg| {
        if let Argument::Strings(args) = arg {
            sink.lock().unwrap().extend(args);
        }
        Ok(())
    });
    let runtime = ClassRuntime::standalone(Arc::new(BuiltinClasses::new()), natives);

    let greeter = ClassFile::new("demo.Greeter").with_method(
        MethodDescriptor::public_static("load", [ParamType::StringList]),
        "greeter_load",
    );
    let handle = write_archive(dir.path(), "greeter.jar", &[greeter]);

    let report = runtime
        .stage_archive(handle, ArchivePolicy::InitializeAll)
        .unwrap();
    assert_eq!(report.classes.len(), 1);

    let loaded = runtime.registry().get("demo.Greeter").unwrap();
    assert!(matches!(loaded.origin(), ClassOrigin::Archive(_)));
    let method = loaded.class().find_methods("load")[0];
    loaded
        .class()
        .invoke(method, Argument::Strings(vec!["hi".into(), "there".into()]))
        .unwrap();
    assert_eq!(*seen.lock().unwrap(), ["hi", "there"]);
}

#[test]
fn test_builtins_shadow_archive_classes() {
    let dir = tempfile::tempdir().unwrap();
    let builtins = Arc::new(BuiltinClasses::new());
    builtins.register(NativeClass::builder(name("shared.Config")).build());
    let natives = Arc::new(NativeTable::new());
    natives.register_method("noop", |_| Ok(()));
    let runtime = ClassRuntime::standalone(builtins, natives);

    let shadow = ClassFile::new("shared.Config").with_method(
        MethodDescriptor::public_static("load", [ParamType::StringList]),
        "noop",
    );
    let handle = write_archive(dir.path(), "shadow.jar", &[shadow]);

    let report = runtime
        .stage_archive(handle, ArchivePolicy::InitializeAll)
        .unwrap();
    assert_eq!(report.classes[0].class.origin(), &ClassOrigin::Base);
    assert!(runtime.registry().get("shared.Config").unwrap().class().methods().is_empty());
}

#[test]
fn test_archive_order_across_two_archives() {
    let dir = tempfile::tempdir().unwrap();
    let natives = Arc::new(NativeTable::new());
    natives.register_method("noop", |_| Ok(()));
    let runtime = ClassRuntime::standalone(Arc::new(BuiltinClasses::new()), natives);

    let class = |n: &str| {
        ClassFile::new(n).with_method(
            MethodDescriptor::public_static("load", [ParamType::StringList]),
            "noop",
        )
    };
    let first = write_archive(dir.path(), "one.jar", &[class("one.B"), class("one.A")]);
    let second = write_archive(dir.path(), "two.jar", &[class("two.Z"), class("two.Y")]);

    runtime.stage_archive(first, ArchivePolicy::DefineOnly).unwrap();
    runtime.stage_archive(second, ArchivePolicy::DefineOnly).unwrap();

    let order: Vec<String> = runtime
        .registry()
        .load_order()
        .iter()
        .map(|n| n.to_string())
        .collect();
    assert_eq!(order, ["one.B", "one.A", "two.Z", "two.Y"]);
}

#[test]
fn test_initializers_run_once_across_stagings() {
    let dir = tempfile::tempdir().unwrap();
    let runs = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&runs);
    let natives = Arc::new(NativeTable::new());
    natives.register_method("noop", |_| Ok(()));
    natives.register_initializer("clinit", move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });
    let runtime = ClassRuntime::standalone(Arc::new(BuiltinClasses::new()), natives);

    let class = ClassFile::new("init.Once")
        .with_method(
            MethodDescriptor::public_static("load", [ParamType::StringList]),
            "noop",
        )
        .with_initializer("clinit");
    let handle = write_archive(dir.path(), "init.jar", &[class]);

    for _ in 0..3 {
        runtime
            .stage_archive(handle.duplicate().unwrap(), ArchivePolicy::InitializeAll)
            .unwrap();
    }
    assert_eq!(runs.load(Ordering::SeqCst), 1);

    let resolved = runtime
        .base_context()
        .resolve_and_initialize(&name("init.Once"))
        .unwrap();
    assert!(!resolved.newly_defined);
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}

#[test]
fn test_truncated_entry_reports_archive() {
    let dir = tempfile::tempdir().unwrap();
    let runtime = ClassRuntime::standalone(
        Arc::new(BuiltinClasses::new()),
        Arc::new(NativeTable::new()),
    );
    let mut bytes = ClassFile::new("cut.Short").encode().unwrap();
    bytes.truncate(bytes.len() - 3);

    let mut writer = ArchiveWriter::new();
    writer.add_file("cut/Short.class", &bytes, Compression::Stored);
    let path = dir.path().join("cut.jar");
    writer.write_to(&path).unwrap();
    let handle = ArchiveHandle::open(ArchiveLocation::from_path(&path)).unwrap();

    let err = runtime
        .stage_archive(handle, ArchivePolicy::InitializeAll)
        .unwrap_err();
    assert!(matches!(err, ArchiveLoadError::Class { .. }));
    assert_eq!(err.location(), path.display().to_string());
    assert!(runtime.registry().is_empty());
}
