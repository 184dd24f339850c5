use serde::{Deserialize, Deserializer, Serialize};

/// Anything the backend identifies by `_id`.
pub trait Identified {
    fn id(&self) -> &str;
}

// ============================================================================
// Auth
// ============================================================================

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response: the token plus whatever else the backend sends along.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct LoginResponse {
    pub token: String,
    #[serde(flatten)]
    pub rest: serde_json::Map<String, serde_json::Value>,
}

// ============================================================================
// Users
// ============================================================================

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Identified for User {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Fields submitted when creating or updating a user.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

// ============================================================================
// Tours
// ============================================================================

/// Pricing category of a tour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceCategory {
    PrivateTourWithLunch,
    PrivateTourWithoutLunch,
    PrivateTourGuide,
    PrivateCarWithDriver,
}

impl PriceCategory {
    pub const ALL: [PriceCategory; 4] = [
        PriceCategory::PrivateTourWithLunch,
        PriceCategory::PrivateTourWithoutLunch,
        PriceCategory::PrivateTourGuide,
        PriceCategory::PrivateCarWithDriver,
    ];

    /// Wire name of the category.
    pub fn key(self) -> &'static str {
        match self {
            PriceCategory::PrivateTourWithLunch => "privateTourWithLunch",
            PriceCategory::PrivateTourWithoutLunch => "privateTourWithoutLunch",
            PriceCategory::PrivateTourGuide => "privateTourGuide",
            PriceCategory::PrivateCarWithDriver => "privateCarWithDriver",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PriceCategory::PrivateTourWithLunch => "Private tour with lunch",
            PriceCategory::PrivateTourWithoutLunch => "Private tour without lunch",
            PriceCategory::PrivateTourGuide => "Private tour guide",
            PriceCategory::PrivateCarWithDriver => "Private car with driver",
        }
    }
}

/// Passenger tier within a price category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceTier {
    Single,
    TwoPeople,
    ThreeToFive,
    AboveSix,
    ChildSixToEleven,
    ChildUnderSix,
}

impl PriceTier {
    pub const ALL: [PriceTier; 6] = [
        PriceTier::Single,
        PriceTier::TwoPeople,
        PriceTier::ThreeToFive,
        PriceTier::AboveSix,
        PriceTier::ChildSixToEleven,
        PriceTier::ChildUnderSix,
    ];

    pub fn key(self) -> &'static str {
        match self {
            PriceTier::Single => "single",
            PriceTier::TwoPeople => "twoPeople",
            PriceTier::ThreeToFive => "threeToFive",
            PriceTier::AboveSix => "aboveSix",
            PriceTier::ChildSixToEleven => "childSixToEleven",
            PriceTier::ChildUnderSix => "childUnderSix",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PriceTier::Single => "Single",
            PriceTier::TwoPeople => "Two people",
            PriceTier::ThreeToFive => "3-5 people",
            PriceTier::AboveSix => "6+ people",
            PriceTier::ChildSixToEleven => "Child 6-11",
            PriceTier::ChildUnderSix => "Child under 6",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PriceTiers {
    #[serde(default, deserialize_with = "lenient::number")]
    pub single: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub two_people: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub three_to_five: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub above_six: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub child_six_to_eleven: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub child_under_six: f64,
}

impl PriceTiers {
    pub fn get(&self, tier: PriceTier) -> f64 {
        match tier {
            PriceTier::Single => self.single,
            PriceTier::TwoPeople => self.two_people,
            PriceTier::ThreeToFive => self.three_to_five,
            PriceTier::AboveSix => self.above_six,
            PriceTier::ChildSixToEleven => self.child_six_to_eleven,
            PriceTier::ChildUnderSix => self.child_under_six,
        }
    }
}

/// Four categories by six passenger tiers.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PriceTable {
    #[serde(default)]
    pub private_tour_with_lunch: PriceTiers,
    #[serde(default)]
    pub private_tour_without_lunch: PriceTiers,
    #[serde(default)]
    pub private_tour_guide: PriceTiers,
    #[serde(default)]
    pub private_car_with_driver: PriceTiers,
}

impl PriceTable {
    pub fn category(&self, category: PriceCategory) -> &PriceTiers {
        match category {
            PriceCategory::PrivateTourWithLunch => &self.private_tour_with_lunch,
            PriceCategory::PrivateTourWithoutLunch => &self.private_tour_without_lunch,
            PriceCategory::PrivateTourGuide => &self.private_tour_guide,
            PriceCategory::PrivateCarWithDriver => &self.private_car_with_driver,
        }
    }

    pub fn get(&self, category: PriceCategory, tier: PriceTier) -> f64 {
        self.category(category).get(tier)
    }
}

/// A media reference attached to a tour.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Media {
    #[serde(default)]
    pub url: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Tour {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub duration: String,
    #[serde(rename = "type", default, deserialize_with = "lenient::string")]
    pub kind: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub availability: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub pick_up_and_drop_off: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub details: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub full_day: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub view_price: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub note: String,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub city: String,
    #[serde(default)]
    pub media: Vec<Media>,
    #[serde(default)]
    pub prices: PriceTable,
}

impl Identified for Tour {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Fields submitted when creating or updating a tour.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TourDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub duration: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub availability: String,
    #[serde(default)]
    pub pick_up_and_drop_off: String,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub full_day: String,
    #[serde(default)]
    pub view_price: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub prices: PriceTable,
}

impl From<&Tour> for TourDraft {
    fn from(tour: &Tour) -> Self {
        Self {
            title: tour.title.clone(),
            description: tour.description.clone(),
            duration: tour.duration.clone(),
            kind: tour.kind.clone(),
            availability: tour.availability.clone(),
            pick_up_and_drop_off: tour.pick_up_and_drop_off.clone(),
            details: tour.details.clone(),
            full_day: tour.full_day.clone(),
            view_price: tour.view_price.clone(),
            note: tour.note.clone(),
            languages: tour.languages.clone(),
            city: tour.city.clone(),
            prices: tour.prices,
        }
    }
}

// ============================================================================
// References
// ============================================================================

/// A reference to another entity: either its bare id, or the entity itself
/// when the backend denormalized it into the response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Ref<T> {
    Id(String),
    Embedded(T),
}

impl<T: Identified> Ref<T> {
    pub fn id(&self) -> &str {
        match self {
            Ref::Id(id) => id,
            Ref::Embedded(entity) => entity.id(),
        }
    }

    pub fn embedded(&self) -> Option<&T> {
        match self {
            Ref::Id(_) => None,
            Ref::Embedded(entity) => Some(entity),
        }
    }
}

// ============================================================================
// Bookings
// ============================================================================

/// Booking status. Decoding ignores case and accepts `canceled`; anything
/// else becomes `Unknown` instead of failing the whole page.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
    Completed,
    Unknown,
}

impl<'de> Deserialize<'de> for BookingStatus {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = lenient::string(d)?;
        Ok(match raw.trim().to_ascii_lowercase().as_str() {
            "" | "pending" => BookingStatus::Pending,
            "confirmed" => BookingStatus::Confirmed,
            "cancelled" | "canceled" => BookingStatus::Cancelled,
            "completed" => BookingStatus::Completed,
            _ => BookingStatus::Unknown,
        })
    }
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 4] = [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::Cancelled,
        BookingStatus::Completed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
            BookingStatus::Unknown => "unknown",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Ref<User>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tour: Option<Ref<Tour>>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default)]
    pub status: BookingStatus,
    #[serde(default, deserialize_with = "lenient::number")]
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participants: Option<u32>,
}

impl Identified for Booking {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Fields submitted when creating or updating a booking. Unset fields are
/// left untouched by the backend.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct BookingDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tour: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<BookingStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participants: Option<u32>,
}

/// Pagination metadata mirrored from the `meta` block of a paginated fetch.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub pages: u64,
    #[serde(default = "first_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub total_amount: f64,
}

fn first_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    10
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            total: 0,
            pages: 0,
            page: first_page(),
            limit: default_limit(),
            total_amount: 0.0,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct PaginatedBookings {
    pub bookings: Vec<Booking>,
    pub meta: Pagination,
}

// ============================================================================
// Reviews
// ============================================================================

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Review {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Ref<User>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tour: Option<Ref<Tour>>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub rating: f64,
    #[serde(default, deserialize_with = "lenient::string")]
    pub comment: String,
    #[serde(default)]
    pub visible: bool,
}

impl Identified for Review {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Tolerant field decoders: the backend is not strict about strings vs numbers.
mod lenient {
    use super::*;
    use serde::de::Error;
    use serde_json::Value;

    pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(match Option::<Value>::deserialize(d)? {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s,
            Some(other) => other.to_string(),
        })
    }

    pub fn number<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        match Option::<Value>::deserialize(d)? {
            None | Some(Value::Null) => Ok(0.0),
            Some(Value::Number(n)) => n
                .as_f64()
                .ok_or_else(|| D::Error::custom("number out of range")),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(0.0),
            Some(Value::String(s)) => s.trim().parse().map_err(D::Error::custom),
            Some(other) => Err(D::Error::custom(format!("expected number, got {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_booking_status_decodes_leniently() {
        let page: PaginatedBookings = serde_json::from_value(json!({
            "bookings": [
                {"_id": "b1", "status": "Confirmed"},
                {"_id": "b2", "status": "canceled"},
                {"_id": "b3", "status": "on-hold"},
                {"_id": "b4", "status": null},
                {"_id": "b5"}
            ],
            "meta": {}
        }))
        .unwrap();
        let statuses: Vec<BookingStatus> = page.bookings.iter().map(|b| b.status).collect();
        assert_eq!(
            statuses,
            vec![
                BookingStatus::Confirmed,
                BookingStatus::Cancelled,
                BookingStatus::Unknown,
                BookingStatus::Pending,
                BookingStatus::Pending,
            ]
        );
    }

    #[test]
    fn test_user_accepts_underscore_id_and_plain_id() {
        let a: User = serde_json::from_value(json!({"_id": "u1", "email": "a@x.io"})).unwrap();
        let b: User = serde_json::from_value(json!({"id": "u2", "email": "b@x.io"})).unwrap();
        assert_eq!(a.id, "u1");
        assert_eq!(b.id, "u2");
        assert_eq!(a.name, "");
    }

    #[test]
    fn test_tour_price_table_parses_nested_and_string_numbers() {
        let tour: Tour = serde_json::from_value(json!({
            "_id": "t1",
            "title": "Old Town Walk",
            "viewPrice": 45,
            "prices": {
                "privateTourWithLunch": {"single": 120, "twoPeople": "200"},
                "privateCarWithDriver": {"childUnderSix": 0}
            },
            "media": [{"url": "https://cdn/x.jpg"}]
        }))
        .unwrap();

        assert_eq!(tour.view_price, "45");
        assert_eq!(
            tour.prices
                .get(PriceCategory::PrivateTourWithLunch, PriceTier::Single),
            120.0
        );
        assert_eq!(
            tour.prices
                .get(PriceCategory::PrivateTourWithLunch, PriceTier::TwoPeople),
            200.0
        );
        assert_eq!(
            tour.prices.get(PriceCategory::PrivateTourGuide, PriceTier::AboveSix),
            0.0
        );
        assert_eq!(tour.media[0].url, "https://cdn/x.jpg");
    }

    #[test]
    fn test_booking_refs_embedded_or_bare() {
        let booking: Booking = serde_json::from_value(json!({
            "_id": "b1",
            "user": {"_id": "u1", "email": "john@example.com"},
            "tour": "t9",
            "date": "2024-06-15",
            "status": "confirmed",
            "amount": 1299
        }))
        .unwrap();

        let user = booking.user.as_ref().unwrap();
        assert_eq!(user.id(), "u1");
        assert_eq!(user.embedded().unwrap().email, "john@example.com");
        let tour = booking.tour.as_ref().unwrap();
        assert_eq!(tour.id(), "t9");
        assert!(tour.embedded().is_none());
        assert_eq!(booking.status, BookingStatus::Confirmed);
        assert_eq!(booking.amount, 1299.0);
    }

    #[test]
    fn test_pagination_defaults() {
        let p = Pagination::default();
        assert_eq!((p.total, p.pages, p.page, p.limit), (0, 0, 1, 10));
        assert_eq!(p.total_amount, 0.0);
    }

    #[test]
    fn test_paginated_bookings_meta() {
        let page: PaginatedBookings = serde_json::from_value(json!({
            "bookings": [{"_id": "b1"}, {"_id": "b2"}],
            "meta": {"total": 42, "pages": 5, "page": 2, "limit": 10, "totalAmount": 5120.5}
        }))
        .unwrap();
        assert_eq!(page.bookings.len(), 2);
        assert_eq!(page.meta.total_amount, 5120.5);
        assert_eq!(page.meta.pages, 5);
    }

    #[test]
    fn test_booking_draft_skips_unset_fields() {
        let draft = BookingDraft {
            status: Some(BookingStatus::Cancelled),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&draft).unwrap(),
            json!({"status": "cancelled"})
        );
    }

    #[test]
    fn test_login_response_keeps_extra_fields() {
        let resp: LoginResponse =
            serde_json::from_value(json!({"token": "abc", "role": "admin"})).unwrap();
        assert_eq!(resp.token, "abc");
        assert_eq!(resp.rest.get("role"), Some(&json!("admin")));
    }
}
