//! Static business data shown by the projector (not user content).

use super::block::{GalleryCell, InfoCard};

/// Company name printed in the footer.
pub const COMPANY_NAME: &str = "Anchorage Business Corp Pvt. Ltd.";
/// Company tagline printed in the footer.
pub const COMPANY_TAGLINE: &str = "Empowering Your Business";

const PHONES: [&str; 3] = ["90250 95059", "82484 34140", "72990 03531"];
const EMAIL: &str = "sales@anchoragebc.com";
const WEBSITE: &str = "www.AnchorageBC.com";
const ADDRESS: [&str; 3] = [
    "#62A, Thiruvalluvar Street",
    "Jagathambigai Nagar, Padi",
    "Chennai - 600 050",
];

const PROJECTS: [(&str, &str); 9] = [
    ("/project-revolving-door.jpg", "Modern Revolving Door Systems"),
    ("/project-elevator-doors.jpg", "Premium Elevator Installations"),
    ("/project-willow-square.jpg", "Willow Square Reception Design"),
    ("/project-luxury-elevators.jpg", "Luxury Elevator Lobbies"),
    ("/project-flamek-kiosk.jpg", "Flamek Display Kiosk"),
    ("/project-cafe-interior.jpg", "Contemporary Café Interiors"),
    ("/project-bharat-petroleum.jpg", "Bharat Petroleum Office"),
    ("/project-elevator-bank.jpg", "Corporate Elevator Banks"),
    ("/project-enchanted-signage.jpg", "Enchanted Building Signage"),
];

/// Project gallery cells.
pub fn project_cells() -> Vec<GalleryCell> {
    PROJECTS
        .iter()
        .map(|(src, caption)| GalleryCell {
            src: src.to_string(),
            caption: caption.to_string(),
        })
        .collect()
}

/// The four contact cards: phone numbers, email, website, address.
pub fn contact_cards() -> Vec<InfoCard> {
    let card = |icon: &str, heading: &str, lines: &[&str]| InfoCard {
        icon: icon.to_string(),
        heading: heading.to_string(),
        lines: lines.iter().map(|l| l.to_string()).collect(),
    };

    vec![
        card("📞", "Phone Numbers", &PHONES),
        card("✉️", "Email", &[EMAIL]),
        card("🌐", "Website", &[WEBSITE]),
        card("📍", "Address", &ADDRESS),
    ]
}

/// Footer contact strip.
pub fn footer_strip() -> Vec<String> {
    vec![
        format!("📞 {}", PHONES[0]),
        format!("✉️ {}", EMAIL),
        format!("🌐 {}", WEBSITE),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_sizes() {
        assert_eq!(project_cells().len(), 9);
        let cards = contact_cards();
        assert_eq!(cards.len(), 4);
        assert_eq!(cards[0].lines.len(), 3);
        assert_eq!(cards[3].heading, "Address");
    }
}
