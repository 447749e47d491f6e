/// Message-Authenticator (80) - RFC 2869 Section 5.14
pub const MESSAGE_AUTHENTICATOR_TYPE: u8 = 80;
/// Total attribute length: type + length + 16 octet HMAC-MD5
pub const MESSAGE_AUTHENTICATOR_LENGTH: u8 = 18;
pub const MESSAGE_AUTHENTICATOR_VALUE_LENGTH: usize = 16;

/// Dictionary name for the attribute types commonly seen next to a
/// Message-Authenticator. Used for trace output only.
pub fn attribute_name(attr_type: u8) -> Option<&'static str> {
    let name = match attr_type {
        1 => "User-Name",
        2 => "User-Password",
        3 => "CHAP-Password",
        4 => "NAS-IP-Address",
        5 => "NAS-Port",
        6 => "Service-Type",
        8 => "Framed-IP-Address",
        18 => "Reply-Message",
        24 => "State",
        25 => "Class",
        26 => "Vendor-Specific",
        30 => "Called-Station-Id",
        31 => "Calling-Station-Id",
        32 => "NAS-Identifier",
        33 => "Proxy-State",
        44 => "Acct-Session-Id",
        61 => "NAS-Port-Type",
        79 => "EAP-Message",
        80 => "Message-Authenticator",
        87 => "NAS-Port-Id",
        _ => return None,
    };
    Some(name)
}
