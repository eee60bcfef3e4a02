// Field journal - the curated article feed served by the archive endpoints

#[derive(Clone, Copy, Debug)]
pub struct Article {
    pub id: &'static str,
    pub title: &'static str,
    pub date: &'static str,
    pub category: &'static str,
    pub author: &'static str,
    pub summary: &'static str,
}

pub const JOURNAL: [Article; 4] = [
    Article {
        id: "1",
        title: "Bio-luminescent Mycelium Networks Discovered in Deep Caves",
        date: "DEC 24, 2025",
        category: "Discovery",
        author: "Dr. Elena Moss",
        summary: "A joint expedition of mycologists and speleologists reports \
                  a vast interconnected network of bio-luminescent mycelium \
                  spanning several kilometers of karst cave systems, its \
                  consistent cyan glow pulsing with subterranean air currents.",
    },
    Article {
        id: "2",
        title: "Sustainable Architecture: Building with Mushroom Bricks",
        date: "DEC 22, 2025",
        category: "Technology",
        author: "Marcus Thorne",
        summary: "A biotechnology startup demonstrates structural bricks grown \
                  from fungal hyphae and agricultural waste, with a high \
                  strength-to-weight ratio, natural fire resistance and a \
                  negative carbon footprint.",
    },
    Article {
        id: "3",
        title: "AI-Driven Fungal Identification App Surpasses Human Accuracy",
        date: "DEC 21, 2025",
        category: "Innovation",
        author: "Network Core",
        summary: "The network's version 4.0 identification engine reaches \
                  99.8% accuracy in controlled field tests, outperforming a \
                  panel of expert mycologists by combining visual data with \
                  geology, climate history and spore patterns.",
    },
    Article {
        id: "4",
        title: "Global Spore Dispersal Patterns Shift Due to Climate Change",
        date: "DEC 19, 2025",
        category: "Environmental",
        author: "Prof. Silas Vane",
        summary: "Tracking data shows species once restricted to tropical \
                  regions appearing in temperate and sub-arctic zones, a \
                  northward migration that risks disrupting native symbioses \
                  between fungi and forest trees.",
    },
];

pub fn find(id: &str) -> Option<&'static Article> {
    JOURNAL.iter().find(|a| a.id == id)
}

pub fn all() -> &'static [Article] {
    &JOURNAL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn journal_lookup_by_id() {
        assert_eq!(find("2").map(|a| a.category), Some("Technology"));
        assert!(find("99").is_none());
    }
}
