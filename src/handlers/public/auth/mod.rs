mod signin;
mod signout;
mod signup;

pub use signin::{session_cookie, signin};
pub use signout::signout;
pub use signup::signup;
