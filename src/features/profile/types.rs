use serde::Serialize;

#[derive(Serialize)]
pub(super) struct UpdateProfileRequest<'a> {
    pub name: &'a str,
}
