use typed_path::Utf8NativePathBuf;

// For argp::FromArgs
pub fn native_path(value: &str) -> Result<Utf8NativePathBuf, String> {
    Ok(Utf8NativePathBuf::from(value))
}

pub fn to_std_path(path: &Utf8NativePathBuf) -> std::path::PathBuf {
    std::path::PathBuf::from(path.as_str())
}
