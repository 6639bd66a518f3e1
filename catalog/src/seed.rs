use shared_types::{Category, Project};

/// Fallback projects shown when the remote source is empty or unreachable
pub fn seed_projects() -> Vec<Project> {
    vec![Project {
        id: "1".to_string(),
        title: "Modern Villa".to_string(),
        description: "A contemporary residential project that seamlessly blends indoor and outdoor spaces. The design emphasizes clean lines, open floor plans, and an abundance of natural light.".to_string(),
        category: Category::Architecture,
        image_url: Some("https://images.unsplash.com/photo-1519662978799-2f05096d3636?crop=entropy&cs=tinysrgb&fit=max&fm=jpg&q=80&w=1080".to_string()),
        instagram_url: Some("https://www.instagram.com/".to_string()),
        linkedin_url: None,
        website_url: Some("https://example.com/modern-villa".to_string()),
        architect: Some("Studio Architects".to_string()),
        location: Some("Los Angeles, USA".to_string()),
    }]
}
