//! The fixed set of stub generation targets.

use std::path::PathBuf;

/// One generation unit: which protos to compile and which files that produces.
///
/// All paths are relative to the workspace root handed to [`crate::generate`] and
/// [`crate::clean`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubTarget {
    /// Short name used on the command line.
    pub name: &'static str,
    /// Include directory passed to the compiler; proto files are resolved against it.
    pub proto_dir: PathBuf,
    /// Proto files, relative to `proto_dir`.
    pub protos: Vec<&'static str>,
    /// Directory the generated files are written to.
    pub out_dir: PathBuf,
    /// Name of the descriptor set written next to the generated sources.
    pub descriptor_file: &'static str,
    /// Every file a successful run leaves in `out_dir`, descriptor included.
    pub generated: Vec<&'static str>,
}

impl StubTarget {
    /// The hello service: `helloService/hello.proto`.
    pub fn hello() -> Self {
        Self {
            name: "hello",
            proto_dir: PathBuf::from("helloService"),
            protos: vec!["hello.proto"],
            out_dir: PathBuf::from("helloService"),
            descriptor_file: "hello_descriptor.bin",
            generated: vec!["hello.rs", "hello_descriptor.bin"],
        }
    }

    /// The todo service: messages and service definitions under `todoService/protos`.
    pub fn todo() -> Self {
        Self {
            name: "todo",
            proto_dir: PathBuf::from("todoService/protos"),
            protos: vec!["todo_messages.proto", "todo_service.proto"],
            out_dir: PathBuf::from("todoService/protos"),
            descriptor_file: "todo_descriptor.bin",
            generated: vec![
                "todo.messages.rs",
                "todo.service.rs",
                "todo_descriptor.bin",
            ],
        }
    }

    /// Every built-in target, in generation order.
    pub fn all() -> Vec<Self> {
        vec![Self::hello(), Self::todo()]
    }

    /// Looks a built-in target up by name.
    pub fn by_name(name: &str) -> Option<Self> {
        Self::all().into_iter().find(|t| t.name == name)
    }
}
