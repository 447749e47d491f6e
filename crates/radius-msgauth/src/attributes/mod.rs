mod attribute;
mod types;

pub use attribute::{Attributes, RawAttribute};
pub use types::{
    attribute_name, MESSAGE_AUTHENTICATOR_LENGTH, MESSAGE_AUTHENTICATOR_TYPE,
    MESSAGE_AUTHENTICATOR_VALUE_LENGTH,
};
