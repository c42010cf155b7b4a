use std::path::{Path, PathBuf};

/// Named page sections, addressable by `#fragment`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionId {
    Hero,
    About,
    Skills,
    Projects,
    Contact,
}

impl SectionId {
    pub const ALL: [SectionId; 5] = [
        SectionId::Hero,
        SectionId::About,
        SectionId::Skills,
        SectionId::Projects,
        SectionId::Contact,
    ];

    pub fn fragment(self) -> &'static str {
        match self {
            SectionId::Hero => "hero",
            SectionId::About => "about",
            SectionId::Skills => "skills",
            SectionId::Projects => "projects",
            SectionId::Contact => "contact",
        }
    }

    pub fn from_fragment(fragment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.fragment() == fragment)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    pub label: &'static str,
    pub href: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct Stat {
    pub number: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct SkillCategory {
    pub title: &'static str,
    pub tags: &'static [&'static str],
}

#[derive(Debug, Clone, Copy)]
pub struct Project {
    pub badge: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub tech: &'static [&'static str],
    pub links: &'static [Link],
}

pub const LOGO: &str = "SUVA";

pub const NAV_LINKS: [Link; 5] = [
    Link { label: "Home", href: "#hero" },
    Link { label: "About", href: "#about" },
    Link { label: "Skills", href: "#skills" },
    Link { label: "Projects", href: "#projects" },
    Link { label: "Contact", href: "#contact" },
];

pub const HERO_TITLE: [&str; 2] = ["FULL-STACK", "DEVELOPER"];
pub const HERO_SUBTITLE: &str = "Building digital experiences that matter";
pub const HERO_FULL_TEXT: &str = "Crafting robust, scalable applications from concept to deployment. Passionate about clean code, innovative solutions, and pushing the boundaries of what's possible.";
pub const HERO_CTA: Link = Link {
    label: "View My Work",
    href: "#projects",
};

pub const ABOUT_TITLE: &str = "About Me";
pub const ABOUT_SUBTITLE: &str = "Code. Create. Innovate.";
pub const ABOUT_FULL_TEXT: &str = "Final-year B.Tech student specializing in Full-Stack Development with hands-on experience in the MERN stack. I have built interactive dashboards, data-driven applications, and secure backend systems with authentication and role-based access control.";
pub const ABOUT_EXTRA: &str = "I enjoy solving complex problems, optimizing performance, and designing systems that are both scalable and user-centric.";

pub const STATS: [Stat; 4] = [
    Stat { number: "10+", label: "Projects Completed" },
    Stat { number: "3+", label: "Years Experience" },
    Stat { number: "100%", label: "Client Satisfaction" },
    Stat { number: "24/7", label: "Learning Mode" },
];

pub const SKILLS_TITLE: &str = "Tech Stack";
pub const SKILLS_SUBTITLE: &str = "Tools & Technologies I Work With";
pub const SKILL_CATEGORIES: [SkillCategory; 4] = [
    SkillCategory {
        title: "Frontend",
        tags: &[
            "React", "Vue.js", "TypeScript", "JavaScript", "HTML5", "CSS3", "Tailwind CSS", "Next.js",
        ],
    },
    SkillCategory {
        title: "Backend",
        tags: &["Node.js", "Express", "REST APIs", "NoSQL", "PostgreSQL", "MongoDB"],
    },
    SkillCategory {
        title: "DevOps & Tools",
        tags: &["Docker", "Git", "CI/CD", "Linux", "Nginx", "Redis", "Kubernetes"],
    },
    SkillCategory {
        title: "Other Skills",
        tags: &["Agile/Scrum", "UI/UX Design", "Java", "WebSockets", "OAuth", "Performance"],
    },
];

pub const PROJECTS_TITLE: &str = "Featured Projects";
pub const PROJECTS_SUBTITLE: &str = "Bringing ideas to life through code";
pub const PROJECTS: [Project; 3] = [
    Project {
        badge: "PROJECT 01",
        title: "ShopSphere",
        description: "A full-featured online shopping platform with real-time inventory management, secure payment integration, and an intuitive admin dashboard.",
        tech: &["React", "Node.js", "MongoDB", "Stripe"],
        links: &[Link { label: "Code", href: "https://github.com/ursuva/E-commerce" }],
    },
    Project {
        badge: "PROJECT 02",
        title: "Stay-Direct",
        description: "Hotel Management System is a full-stack web application designed to streamline hotel operations such as room booking, guest management, check-in/check-out, and billing. The system provides an intuitive admin dashboard for tracking room availability and customer records, helping hotels manage their workflow efficiently and digitally.",
        tech: &["Express.js", "React.js", "Clerk", "Node.js"],
        links: &[Link { label: "Code", href: "https://github.com/ursuva/HotelBooking-System" }],
    },
    Project {
        badge: "PROJECT 03",
        title: "Movie-Pickup",
        description: "Movie Recommendation System is a analytical application that suggests personalized movies based on user preferences and viewing history. It uses data analysis and recommendation algorithms to enhance user experience and content discovery.",
        tech: &["Python", "Streamlit", "Web Scraping", "TMDB API"],
        links: &[Link { label: "Code", href: "https://github.com/ursuva/ev-dashboard" }],
    },
];

pub const CONTACT_TITLE: &str = "Get In Touch";
pub const CONTACT_SUBTITLE: &str = "Let's build something amazing together";
pub const CONTACT_RECIPIENT: &str = "suvabiswas246@gmail.com";
pub const SUBMIT_LABEL: &str = "Send Message";

pub const SOCIAL_LINKS: [Link; 4] = [
    Link { label: "GH", href: "https://github.com/ursuva" },
    Link { label: "LI", href: "https://www.linkedin.com/in/suvajit-biswas-32a175353/" },
    Link { label: "TW", href: "https://x.com/ursuva3000" },
    Link { label: "EM", href: "mailto:suvabiswas246@gmail.com" },
];
pub const FOOTER_NOTE: &str = "\u{a9} 2026 SUVA - Full-Stack Developer Portfolio. Designed & Built with passion.";

/// The profile picture shown in the hero section.
#[derive(Debug, Clone, Copy)]
pub struct AssetRef {
    pub path: &'static str,
    pub alt: &'static str,
}

pub const PROFILE_PICTURE: AssetRef = AssetRef {
    path: "mine.jpeg",
    alt: "Suvajit Biswas",
};

/// Result of looking an asset up on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetStatus {
    Found(PathBuf),
    Missing,
}

impl AssetRef {
    pub fn resolve(&self, asset_dir: Option<&Path>) -> AssetStatus {
        let dir = asset_dir.unwrap_or_else(|| Path::new("."));
        let candidate = dir.join(self.path);
        if candidate.is_file() {
            AssetStatus::Found(candidate)
        } else {
            AssetStatus::Missing
        }
    }
}
