//! In-process JVM launch: load the runtime library, create the VM, invoke
//! the entry point, tear everything down.
//!
//! The sequence is linear with no retries past library selection: once a
//! library file exists, a load failure aborts rather than falling through to
//! the next candidate. Teardown runs on every exit path via a scope guard
//! over the created VM plus normal ownership of the loaded library.

use std::ffi::{c_char, c_void, CString};
use std::path::{Path, PathBuf};
use std::ptr;

use jni::objects::{JObject, JValue};
use jni::sys;
use jni::{JNIEnv, JavaVM};
use tracing::{debug, warn};

use crate::error::{creation_failure_cause, LaunchError};
use crate::jvm::classpath::{
    find_tools_jar, resolve_user_classpath, ClasspathBuilder, ClasspathPolicy,
    JarDirSpec,
};
use crate::jvm::locate::{
    find_jvm_library, resolve_java_home, JavaHomePolicy, VmSelectStrategy,
};
use crate::jvm::options::VmOptions;

/// Whether and how `tools.jar` participates in the launch.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToolsJarPolicy {
    /// Expose it as the `tools.jar` system property.
    pub as_sysprop: bool,
    /// Append it to the classpath.
    pub on_classpath: bool,
}

/// Everything needed to perform one launch. Built once by the pipeline and
/// treated as immutable from there on.
#[derive(Debug)]
pub struct LaunchOptions {
    pub java_home: Option<PathBuf>,
    /// `-jh` / `--javahome` value from the command line, if given.
    pub java_home_from_args: Option<String>,
    pub java_home_policy: JavaHomePolicy,
    pub vm_strategy: VmSelectStrategy,
    pub classpath_policy: ClasspathPolicy,
    pub user_classpath: Option<String>,
    pub jar_dirs: Vec<JarDirSpec>,
    pub jars: Vec<PathBuf>,
    pub tools_jar: ToolsJarPolicy,
    pub vm_options: VmOptions,
    /// Options the launcher itself prepends to the launchee argument array
    /// (e.g. `--main <class>`).
    pub extra_program_options: Vec<String>,
    /// User arguments for the launchee, already classified and ordered.
    pub launchee_args: Vec<String>,
    /// JNI-style class name, e.g. `org/codehaus/groovy/tools/GroovyStarter`.
    pub entry_class: String,
    /// Static method with signature `([Ljava/lang/String;)V`.
    pub entry_method: String,
}

impl LaunchOptions {
    /// The full option vector in its fixed order: classpath first, then the
    /// tools.jar system property, then everything the accumulator collected.
    /// `java_home` is consulted only for tools.jar.
    pub fn vm_option_strings(
        &self,
        java_home: &Path,
    ) -> Result<Vec<String>, LaunchError> {
        let tools_jar = find_tools_jar(java_home);

        let mut cp = ClasspathBuilder::new();
        for spec in &self.jar_dirs {
            cp.scan_jar_dir(spec)?;
        }
        for jar in &self.jars {
            cp.push_entry(jar.to_string_lossy().into_owned());
        }
        if let Some(user) = resolve_user_classpath(
            self.classpath_policy,
            self.user_classpath.as_deref(),
        ) {
            cp.push_entry(user);
        }
        if self.tools_jar.on_classpath {
            if let Some(jar) = &tools_jar {
                cp.push_entry(jar.to_string_lossy().into_owned());
            }
        }

        let mut strings = vec![cp.build()];
        if self.tools_jar.as_sysprop {
            if let Some(jar) = &tools_jar {
                strings.push(format!("-Dtools.jar={}", jar.display()));
            }
        }
        strings.extend(self.vm_options.iter().map(str::to_string));
        Ok(strings)
    }
}

type CreateVmFn = unsafe extern "system" fn(
    *mut *mut sys::JavaVM,
    *mut *mut c_void,
    *mut c_void,
) -> sys::jint;

/// Run the launch to completion. Returns only after the entry point has
/// returned and the VM has been destroyed.
pub fn launch(options: &LaunchOptions) -> Result<(), LaunchError> {
    let java_home = resolve_java_home(
        options.java_home.as_deref(),
        options.java_home_from_args.as_deref(),
        options.java_home_policy,
    )?;

    let vm_option_strings = options.vm_option_strings(&java_home)?;
    for opt in &vm_option_strings {
        debug!(option = %opt, "jvm option");
    }

    let library_path = find_jvm_library(&java_home, options.vm_strategy)?;
    let library = unsafe { libloading::Library::new(&library_path) }.map_err(
        |source| LaunchError::JvmLibraryLoad {
            path: library_path.clone(),
            source,
        },
    )?;
    let create_vm: libloading::Symbol<CreateVmFn> =
        unsafe { library.get(b"JNI_CreateJavaVM") }.map_err(|source| {
            LaunchError::CreatorSymbolMissing {
                path: library_path.clone(),
                source,
            }
        })?;

    let vm = create_java_vm(&create_vm, &vm_option_strings)?;
    // Destroyed on every exit path; the library outlives the guard because
    // it was declared first.
    let vm = scopeguard::guard(vm, |vm| {
        debug!("destroying jvm");
        if let Err(err) = unsafe { vm.destroy() } {
            warn!(error = %err, "jvm destruction reported an error");
        }
    });

    let mut env = vm.attach_current_thread_permanently()?;
    run_entry_point(&mut env, options)
}

fn create_java_vm(
    create_vm: &CreateVmFn,
    option_strings: &[String],
) -> Result<JavaVM, LaunchError> {
    let c_options: Vec<CString> = option_strings
        .iter()
        .map(|opt| {
            CString::new(opt.as_str()).map_err(|_| LaunchError::StringConversion {
                value: opt.clone(),
            })
        })
        .collect::<Result<_, _>>()?;
    let mut jni_options: Vec<sys::JavaVMOption> = c_options
        .iter()
        .map(|opt| sys::JavaVMOption {
            optionString: opt.as_ptr() as *mut c_char,
            extraInfo: ptr::null_mut(),
        })
        .collect();
    let mut init_args = sys::JavaVMInitArgs {
        version: sys::JNI_VERSION_1_8,
        nOptions: jni_options.len() as sys::jint,
        options: jni_options.as_mut_ptr(),
        ignoreUnrecognized: sys::JNI_FALSE,
    };

    let mut vm_ptr: *mut sys::JavaVM = ptr::null_mut();
    let mut env_ptr: *mut c_void = ptr::null_mut();
    let code = unsafe {
        create_vm(
            &mut vm_ptr,
            &mut env_ptr,
            &mut init_args as *mut sys::JavaVMInitArgs as *mut c_void,
        )
    };
    if code != sys::JNI_OK || vm_ptr.is_null() {
        return Err(LaunchError::JvmCreation {
            code,
            cause: creation_failure_cause(code),
        });
    }
    debug!("jvm created");
    Ok(unsafe { JavaVM::from_raw(vm_ptr) }?)
}

/// Resolve the entry class and method, build the `String[]` argument array
/// and invoke. An uncaught Java exception is described and cleared so the
/// process can exit in an orderly way.
fn run_entry_point(
    env: &mut JNIEnv,
    options: &LaunchOptions,
) -> Result<(), LaunchError> {
    let class = match env.find_class(options.entry_class.as_str()) {
        Ok(class) => class,
        Err(_) => {
            clear_pending_exception(env);
            return Err(LaunchError::EntryClassNotFound {
                class: options.entry_class.clone(),
            });
        }
    };
    let signature = "([Ljava/lang/String;)V";
    if env
        .get_static_method_id(&class, options.entry_method.as_str(), signature)
        .is_err()
    {
        clear_pending_exception(env);
        return Err(LaunchError::EntryMethodNotFound {
            class: options.entry_class.clone(),
            method: options.entry_method.clone(),
        });
    }

    let program_args: Vec<&String> = options
        .extra_program_options
        .iter()
        .chain(options.launchee_args.iter())
        .collect();
    for arg in &program_args {
        debug!(arg = %arg, "launchee argument");
    }
    let array = env.new_object_array(
        program_args.len() as sys::jsize,
        "java/lang/String",
        JObject::null(),
    )?;
    for (i, arg) in program_args.iter().enumerate() {
        let jstr = match env.new_string(arg.as_str()) {
            Ok(jstr) => jstr,
            Err(_) => {
                clear_pending_exception(env);
                return Err(LaunchError::StringConversion {
                    value: (*arg).clone(),
                });
            }
        };
        env.set_object_array_element(&array, i as sys::jsize, &jstr)?;
    }

    debug!(
        class = %options.entry_class,
        method = %options.entry_method,
        "invoking entry point"
    );
    match env.call_static_method(
        &class,
        options.entry_method.as_str(),
        signature,
        &[JValue::Object(&array)],
    ) {
        Ok(_) => Ok(()),
        Err(jni::errors::Error::JavaException) => {
            clear_pending_exception(env);
            Err(LaunchError::UncaughtException {
                class: options.entry_class.clone(),
                method: options.entry_method.clone(),
            })
        }
        Err(other) => Err(other.into()),
    }
}

/// Print the pending exception (if any) to stderr and clear it.
fn clear_pending_exception(env: &mut JNIEnv) {
    if env.exception_check().unwrap_or(false) {
        let _ = env.exception_describe();
        let _ = env.exception_clear();
    }
}
