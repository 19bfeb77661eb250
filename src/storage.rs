use std::path::PathBuf;

use crate::error::AppError;

#[cfg(target_os = "android")]
use jni::objects::JObject;
#[cfg(target_os = "android")]
use jni::JNIEnv;
#[cfg(target_os = "android")]
use ndk_context::android_context;

/// Config file name inside the app directory
pub const CONFIG_FILE: &str = "marsphotos.toml";

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "MARSPHOTOS_CONFIG";

/// Returns the app directory (config and local database live here)
#[cfg(target_os = "android")]
pub fn get_app_directory() -> Result<PathBuf, AppError> {
    android_files_dir()
}

#[cfg(not(target_os = "android"))]
pub fn get_app_directory() -> Result<PathBuf, AppError> {
    Ok(std::env::current_dir()?)
}

/// Returns the path of the config file
pub fn get_config_path() -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }
    Ok(get_app_directory()?.join(CONFIG_FILE))
}

/// Resolves a file name relative to the app directory; absolute paths pass through
pub fn resolve_in_app_directory(file: &str) -> Result<PathBuf, AppError> {
    let path = PathBuf::from(file);
    if path.is_absolute() {
        return Ok(path);
    }
    Ok(get_app_directory()?.join(path))
}

#[cfg(target_os = "android")]
fn android_files_dir() -> Result<PathBuf, AppError> {
    use jni::JavaVM;

    let vm_ptr = android_context().vm() as *mut jni::sys::JavaVM;

    let vm = unsafe { JavaVM::from_raw(vm_ptr) }
        .map_err(|e| AppError::Other(format!("JavaVM creation failed: {}", e)))?;

    let mut env = vm
        .attach_current_thread()
        .map_err(|e| AppError::Other(format!("Failed to attach thread: {}", e)))?;

    let context_ptr = android_context().context();
    let context = unsafe { JObject::from_raw(context_ptr as jni::sys::jobject) };

    get_files_dir(&mut env, &context)
}

#[cfg(target_os = "android")]
fn get_files_dir(env: &mut JNIEnv, context: &JObject) -> Result<PathBuf, AppError> {
    let file = env
        .call_method(context, "getFilesDir", "()Ljava/io/File;", &[])
        .map_err(|e| AppError::Other(format!("getFilesDir failed: {}", e)))?;

    let file_obj = file
        .l()
        .map_err(|e| AppError::Other(format!("Failed to get file object: {}", e)))?;

    let path_jstring = env
        .call_method(file_obj, "getAbsolutePath", "()Ljava/lang/String;", &[])
        .map_err(|e| AppError::Other(format!("getAbsolutePath failed: {}", e)))?;

    let path_obj = path_jstring
        .l()
        .map_err(|e| AppError::Other(format!("Failed to get path object: {}", e)))?;

    let path_str: String = env
        .get_string(&path_obj.into())
        .map_err(|e| AppError::Other(format!("Failed to get string: {}", e)))?
        .into();

    Ok(PathBuf::from(path_str))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_path_passes_through() {
        let absolute = std::env::temp_dir().join("photos.db");
        let resolved = resolve_in_app_directory(absolute.to_str().unwrap()).unwrap();
        assert_eq!(resolved, absolute);
    }

    #[test]
    fn test_relative_path_joins_app_directory() {
        let resolved = resolve_in_app_directory("photos.db").unwrap();
        assert_eq!(resolved, get_app_directory().unwrap().join("photos.db"));
    }
}
