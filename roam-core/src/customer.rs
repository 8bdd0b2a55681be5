/// The upsert payload for a holiday-package customer. Email is the natural
/// key; name and phone are refreshed on every repeat booking or review.
#[derive(Debug, Clone)]
pub struct CustomerUpsert {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl CustomerUpsert {
    pub fn new(name: Option<String>, email: String, phone: Option<String>) -> Self {
        Self {
            name: name.unwrap_or_default(),
            email,
            phone: phone.unwrap_or_default(),
        }
    }
}
