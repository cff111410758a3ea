//! Diesel table definitions matching `backend/migrations`.
//!
//! Keep in step with the migrations; `diesel print-schema` against a migrated
//! database regenerates these.

diesel::table! {
    /// Users keyed by their self-chosen identifier.
    users (id) {
        id -> Varchar,
        display_name -> Varchar,
        /// `metric` or `imperial`, enforced by a check constraint.
        default_units -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Saved locations, each owned by one user.
    locations (id) {
        id -> Uuid,
        user_id -> Varchar,
        city -> Varchar,
        country_code -> Varchar,
        /// Declared with the "C" collation so ordering is byte-wise.
        nickname -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(locations -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(users, locations);
