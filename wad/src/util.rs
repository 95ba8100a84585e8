use super::types::WadName;

pub fn is_untextured(name: &WadName) -> bool {
    name[0] == b'-' && name[1] == b'\0'
}
