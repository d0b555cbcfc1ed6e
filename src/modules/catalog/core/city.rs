/// Canonical form used whenever two city names are compared.
///
/// Every adapter and the application layer go through this helper so that
/// "Paris", " PARIS " and "paris" resolve to the same venues.
pub fn normalize_city(city: &str) -> String {
    city.trim().to_lowercase()
}

pub fn same_city(left: &str, right: &str) -> bool {
    normalize_city(left) == normalize_city(right)
}
