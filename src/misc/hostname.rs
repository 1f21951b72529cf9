use crate::Result;
use ohno::bail;

/// Upper bound for a host name, including the terminating NUL.
#[cfg(unix)]
const HOST_NAME_BUF_LEN: usize = 256;

/// The network name of the local host.
#[cfg(unix)]
pub fn hostname() -> Result<String> {
    use ohno::IntoAppError;

    let mut buf = [0u8; HOST_NAME_BUF_LEN];

    // SAFETY: `buf` is valid for writes of `buf.len()` bytes for the duration of the call.
    let rc = unsafe { libc::gethostname(buf.as_mut_ptr().cast(), buf.len()) };
    if rc != 0 {
        return Err(std::io::Error::last_os_error()).into_app_err("could not determine host name");
    }

    let len = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    let name = String::from_utf8(buf[..len].to_vec()).into_app_err("host name is not valid UTF-8")?;
    if name.is_empty() {
        bail!("host name is empty");
    }

    Ok(name)
}

/// The network name of the local host.
#[cfg(not(unix))]
pub fn hostname() -> Result<String> {
    match std::env::var("COMPUTERNAME") {
        Ok(name) if !name.is_empty() => Ok(name),
        _ => bail!("could not determine host name"),
    }
}
