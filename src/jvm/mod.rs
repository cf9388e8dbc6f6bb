//! JVM embedding: classpath and option assembly, runtime location, and the
//! in-process launch itself.

mod classpath;
mod launcher;
mod locate;
mod options;

pub use classpath::{
    find_startup_jar, find_tools_jar, path_separator, resolve_user_classpath,
    ClasspathBuilder, ClasspathPolicy, JarDirSpec, StartupJarSpec,
    CLASSPATH_PREFIX,
};
pub use launcher::{launch, LaunchOptions, ToolsJarPolicy};
pub use locate::{
    find_jvm_library, jvm_library_candidates, resolve_java_home, JavaHomePolicy,
    VmFlavor, VmSelectStrategy,
};
pub use options::VmOptions;
