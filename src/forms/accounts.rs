use serde::Deserialize;
use validator::{Validate, ValidationErrors};

use crate::domain::client::NewClient;
use crate::domain::types::{
    EmailAddress, Identifier, NationalId, PersonName, PhoneNumber, PhoneRegion,
};
use crate::domain::vet::NewVet;
use crate::forms::{checked, derived_errors, field_error};

pub const MIN_SECRET_LENGTH: usize = 8;

#[derive(Debug, Deserialize, Validate)]
/// Payload for registering a client or a veterinarian together with its
/// login credential.
pub struct RegisterAccountForm {
    #[serde(default, alias = "usuario")]
    #[validate(length(max = 64))]
    pub identifier: String,
    #[serde(default, alias = "clave", alias = "password")]
    pub secret: String,
    #[serde(default, alias = "cedula")]
    #[validate(length(max = 32))]
    pub national_id: String,
    #[serde(default, alias = "nombre")]
    #[validate(length(max = 128))]
    pub name: String,
    #[serde(default, alias = "telefono")]
    pub phone: String,
    #[serde(default, alias = "correo")]
    pub email: String,
}

impl RegisterAccountForm {
    /// Validates the payload, returning the client profile and the plain
    /// secret that still has to be hashed.
    pub fn into_new_client(
        self,
        region: PhoneRegion,
    ) -> Result<(NewClient, String), ValidationErrors> {
        self.into_profile(region, NewClient::new)
    }

    /// Same as [`Self::into_new_client`] for a veterinarian profile.
    pub fn into_new_vet(self, region: PhoneRegion) -> Result<(NewVet, String), ValidationErrors> {
        self.into_profile(region, NewVet::new)
    }

    fn into_profile<T>(
        self,
        region: PhoneRegion,
        build: impl FnOnce(Identifier, NationalId, PersonName, PhoneNumber, EmailAddress) -> T,
    ) -> Result<(T, String), ValidationErrors> {
        let mut errors = derived_errors(&self);

        if self.secret.chars().count() < MIN_SECRET_LENGTH {
            errors.add(
                "secret",
                field_error(
                    "length",
                    format!("secret must be at least {MIN_SECRET_LENGTH} characters"),
                ),
            );
        }

        let identifier = checked(&mut errors, "identifier", Identifier::new(self.identifier));
        let national_id = checked(&mut errors, "national_id", NationalId::new(self.national_id));
        let name = checked(&mut errors, "name", PersonName::new(self.name));
        let phone = checked(
            &mut errors,
            "phone",
            PhoneNumber::with_region(self.phone, region),
        );
        let email = checked(&mut errors, "email", EmailAddress::new(self.email));

        match (identifier, national_id, name, phone, email) {
            (Some(identifier), Some(national_id), Some(name), Some(phone), Some(email))
                if errors.is_empty() =>
            {
                Ok((build(identifier, national_id, name, phone, email), self.secret))
            }
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> RegisterAccountForm {
        RegisterAccountForm {
            identifier: "ana".to_string(),
            secret: "s3cret-pass".to_string(),
            national_id: "1020304050".to_string(),
            name: "Ana Pérez".to_string(),
            phone: "300 123 4567".to_string(),
            email: "Ana@Example.com".to_string(),
        }
    }

    #[test]
    fn valid_form_is_normalized() {
        let (client, secret) = form().into_new_client(PhoneRegion::default()).unwrap();
        assert_eq!(client.phone.as_str(), "+573001234567");
        assert_eq!(client.email.as_str(), "ana@example.com");
        assert_eq!(secret, "s3cret-pass");
    }

    #[test]
    fn every_bad_field_is_reported() {
        let bad = RegisterAccountForm {
            identifier: " ".to_string(),
            secret: "short".to_string(),
            email: "nope".to_string(),
            ..form()
        };
        let errors = bad.into_new_vet(PhoneRegion::default()).unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("identifier"));
        assert!(fields.contains_key("secret"));
        assert!(fields.contains_key("email"));
        assert!(!fields.contains_key("name"));
    }

    #[test]
    fn original_field_names_deserialize() {
        let form: RegisterAccountForm = serde_json::from_str(
            r#"{"usuario":"ana","clave":"s3cret-pass","cedula":"1","nombre":"Ana","telefono":"3001234567","correo":"ana@example.com"}"#,
        )
        .unwrap();
        assert_eq!(form.identifier, "ana");
        assert_eq!(form.national_id, "1");
    }
}
