use poem_openapi::Tags;

#[derive(Debug, Tags)]
pub enum ApiTags {
    Health,
    /// Catalog of sweets
    Sweets,
    /// The caller's shopping cart
    Cart,
    /// Orders produced by checkout
    Orders,
}
