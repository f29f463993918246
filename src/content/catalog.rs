//! Built-in content. Used when no gallery manifest is configured or the
//! manifest cannot be fetched.

use super::ContentEntry;

fn publication(title: &str, venue: &str, year: &str, description: &str, link: &str) -> ContentEntry {
    ContentEntry::Publication {
        title: title.to_string(),
        venue: venue.to_string(),
        year: year.to_string(),
        description: description.to_string(),
        link: Some(link.to_string()),
    }
}

pub fn intro() -> ContentEntry {
    ContentEntry::Intro {
        title: "iowyth hezel ulthiin".to_string(),
        content: "<p>scholar · artist</p><p>weaver of worlds</p>".to_string(),
    }
}

pub fn publications() -> Vec<ContentEntry> {
    vec![
        publication(
            "The Phenomenology of Dissensus",
            "Review of Education, Pedagogy, and Cultural Studies",
            "2024",
            "An exploration of epistemic communities and the phenomenology of belief in alternative cosmologies.",
            "https://www.tandfonline.com/doi/full/10.1080/10714413.2024.2427894",
        ),
        publication(
            "Before and After Gravity",
            "Canadian Journal of Theology, Mental Health and Disability",
            "2024",
            "A series of intimate drawings exploring the sublime as a site of queer spiritual connection.",
            "https://jps.library.utoronto.ca/index.php/cjtmhd/article/view/44515",
        ),
        publication(
            "The Witch: A Pedagogy of Immanence",
            "Dio Press (Monograph)",
            "2023",
            "A journey through trauma to resilience, seeking seeds of an Indigenous way of being within settler culture.",
            "https://www.diopress.com/the-witch",
        ),
        publication(
            "The Capitol Riots",
            "Routledge (Co-edited)",
            "2022",
            "Digital Media, Disinformation, and Democracy Under Attack.",
            "https://www.routledge.com/The-Capitol-Riots-Digital-Media-Disinformation-and-Democracy-Under-Attack/Jeppesen-Hoechsmann-ulthiin-VanDyke-McKee/p/book/9781032246864",
        ),
        publication(
            "Body as Prism",
            "Canadian Journal of Environmental Education",
            "2020",
            "Somatic pedagogy in the development of embodied ecological awareness.",
            "https://cjee.lakeheadu.ca/article/view/1655",
        ),
    ]
}

pub fn texts() -> Vec<ContentEntry> {
    vec![ContentEntry::Text {
        title: "About".to_string(),
        content: concat!(
            "<p>I am a performance artist and PhD student whose practice moves between dance, ",
            "voice, illustration, and writing—examining participatory culture through a ",
            "métis-crip-queer lens.</p>",
            "<p>My work focuses on building horizontal power relations through community-based ",
            "praxis, integrating creative expression with social justice and the utopic ",
            "visioning of radical social alternatives.</p>"
        )
        .to_string(),
    }]
}

pub fn media() -> Vec<ContentEntry> {
    vec![ContentEntry::Video {
        title: "Waves".to_string(),
        embed_url: "https://player.vimeo.com/video/187204270".to_string(),
        description: String::new(),
    }]
}

pub fn interactive() -> Vec<ContentEntry> {
    vec![ContentEntry::Interactive {
        title: "Möbius-Klein Attractor".to_string(),
        handler: crate::interactive::MOBIUS_ATTRACTOR.to_string(),
        description: "Higher-dimensional recursive folding with plasma oscillation.".to_string(),
    }]
}

/// Every built-in entry, intro first.
pub fn all() -> Vec<ContentEntry> {
    let mut pages = vec![intro()];
    pages.extend(publications());
    pages.extend(texts());
    pages.extend(media());
    pages.extend(interactive());
    pages
}
