//! Privilege checks.

/// Reports whether the process runs with administrative rights.
///
/// On Windows this is the elevation flag of the process token; on Unix it
/// is an effective uid of 0. Returns `None` where the check is not
/// implemented or the token cannot be queried.
#[must_use]
pub fn is_elevated() -> Option<bool> {
    #[cfg(windows)]
    {
        token_is_elevated()
    }

    #[cfg(unix)]
    {
        // SAFETY: `geteuid` has no preconditions and cannot fail.
        Some(unsafe { libc::geteuid() } == 0)
    }

    #[cfg(not(any(windows, unix)))]
    {
        None
    }
}

#[cfg(windows)]
fn token_is_elevated() -> Option<bool> {
    use std::mem;
    use winapi::shared::minwindef::DWORD;
    use winapi::um::handleapi::CloseHandle;
    use winapi::um::processthreadsapi::{GetCurrentProcess, OpenProcessToken};
    use winapi::um::securitybaseapi::GetTokenInformation;
    use winapi::um::winnt::{HANDLE, TOKEN_ELEVATION, TOKEN_QUERY, TokenElevation};

    // SAFETY: the token handle is only used after `OpenProcessToken`
    // succeeds and is closed before returning; `elevation` is a valid
    // out-buffer of the size passed to `GetTokenInformation`.
    unsafe {
        let mut token: HANDLE = mem::zeroed();
        if OpenProcessToken(GetCurrentProcess(), TOKEN_QUERY, &mut token) == 0 {
            return None;
        }

        let mut elevation: TOKEN_ELEVATION = mem::zeroed();
        let mut size: DWORD = 0;
        let result = GetTokenInformation(
            token,
            TokenElevation,
            std::ptr::addr_of_mut!(elevation).cast::<winapi::ctypes::c_void>(),
            mem::size_of::<TOKEN_ELEVATION>() as DWORD,
            &mut size,
        );
        CloseHandle(token);

        (result != 0).then_some(elevation.TokenIsElevated != 0)
    }
}
