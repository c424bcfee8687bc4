use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Serialize;

const SUCCESS_COOKIE: &str = "flash_success";
const ERROR_COOKIE: &str = "flash_error";

#[derive(Serialize, Debug, Default, PartialEq, Eq)]
pub struct Flash {
    pub success: Option<String>,
    pub error: Option<String>,
}

pub fn success(jar: CookieJar, message: &str) -> CookieJar {
    jar.add(
        Cookie::build(SUCCESS_COOKIE, message.to_string())
            .path("/")
            .finish(),
    )
}

pub fn error(jar: CookieJar, message: &str) -> CookieJar {
    jar.add(
        Cookie::build(ERROR_COOKIE, message.to_string())
            .path("/")
            .finish(),
    )
}

/// Reads the pending flash messages and clears them, so a message is shown on
/// exactly one render.
pub fn take(jar: CookieJar) -> (CookieJar, Flash) {
    let flash = Flash {
        success: jar
            .get(SUCCESS_COOKIE)
            .map(|cookie| cookie.value().to_string()),
        error: jar
            .get(ERROR_COOKIE)
            .map(|cookie| cookie.value().to_string()),
    };

    let mut success_removal = Cookie::named(SUCCESS_COOKIE);
    success_removal.set_path("/");
    let mut error_removal = Cookie::named(ERROR_COOKIE);
    error_removal.set_path("/");

    (jar.remove(success_removal).remove(error_removal), flash)
}

#[cfg(test)]
mod tests {
    use axum_extra::extract::cookie::CookieJar;

    #[test]
    fn take_clears_messages() {
        let jar = super::success(CookieJar::new(), "Signed in!");
        let (jar, flash) = super::take(jar);
        assert_eq!(flash.success.as_deref(), Some("Signed in!"));
        assert_eq!(flash.error, None);

        let (_, flash) = super::take(jar);
        assert_eq!(flash, super::Flash::default());
    }

    #[test]
    fn success_and_error_are_independent() {
        let jar = super::error(CookieJar::new(), "Restaurant didn't exist!");
        let (_, flash) = super::take(jar);
        assert_eq!(flash.success, None);
        assert_eq!(flash.error.as_deref(), Some("Restaurant didn't exist!"));
    }
}
