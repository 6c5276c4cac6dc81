use serde::Serialize;

/// Static campus event catalog entry. Read-only reference data; users never
/// create these.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: u32,
    pub title: String,
    pub category: String,
    pub organizer: String,
    pub date: String,
    pub location: String,
    pub description: String,
    pub tags: Vec<String>,
    pub registration_link: String,
    pub quota: u32,
    pub fee: String,
}

#[allow(clippy::too_many_arguments)]
fn event(
    id: u32,
    title: &str,
    category: &str,
    organizer: &str,
    date: &str,
    location: &str,
    description: &str,
    tags: &[&str],
    registration_link: &str,
    quota: u32,
    fee: &str,
) -> Event {
    Event {
        id,
        title: title.to_owned(),
        category: category.to_owned(),
        organizer: organizer.to_owned(),
        date: date.to_owned(),
        location: location.to_owned(),
        description: description.to_owned(),
        tags: tags.iter().map(|t| (*t).to_owned()).collect(),
        registration_link: registration_link.to_owned(),
        quota,
        fee: fee.to_owned(),
    }
}

/// The shipped catalog. A live deployment would source this from an event
/// platform; the recommender only needs a consistent snapshot per request.
pub fn catalog() -> Vec<Event> {
    vec![
        event(
            1,
            "Workshop Machine Learning untuk Pemula",
            "Seminar",
            "Himpunan Mahasiswa Informatika UNS",
            "2025-11-05",
            "Gedung Informatika Lt. 3",
            "Workshop intensif tentang dasar-dasar Machine Learning dengan TensorFlow",
            &["teknologi", "AI", "programming"],
            "https://bit.ly/ml-workshop-uns",
            50,
            "Gratis",
        ),
        event(
            2,
            "Lomba Business Plan Nasional 2025",
            "Lomba",
            "BEM FEB UNS",
            "2025-11-15",
            "Online",
            "Kompetisi business plan tingkat nasional dengan total hadiah 25 juta",
            &["bisnis", "entrepreneurship", "kompetisi"],
            "https://bit.ly/bizplan-uns",
            100,
            "Rp 150.000/tim",
        ),
        event(
            3,
            "Rekrutmen UKM Robotika",
            "UKM",
            "UKM Robotika UNS",
            "2025-11-01",
            "Lab Robotika Gedung Teknik",
            "Pendaftaran anggota baru UKM Robotika periode 2025/2026",
            &["robotika", "teknologi", "organisasi"],
            "https://bit.ly/ukm-robotika",
            30,
            "Gratis",
        ),
        event(
            4,
            "Volunteer Teaching di Desa Binaan",
            "Volunteering",
            "KKN Tematik UNS",
            "2025-11-10",
            "Desa Sukamaju, Karanganyar",
            "Program mengajar anak-anak di desa binaan UNS",
            &["sosial", "pendidikan", "volunteer"],
            "https://bit.ly/volunteer-uns",
            20,
            "Gratis",
        ),
        event(
            5,
            "Seminar Nasional: Inovasi Teknologi Hijau",
            "Seminar",
            "Fakultas Pertanian UNS",
            "2025-11-20",
            "Auditorium Utama UNS",
            "Seminar tentang teknologi ramah lingkungan dan sustainable agriculture",
            &["lingkungan", "teknologi", "pertanian"],
            "https://bit.ly/greentech-seminar",
            200,
            "Rp 50.000",
        ),
        event(
            6,
            "Hackathon Smart Campus 2025",
            "Lomba",
            "HMIF & IEEE UNS",
            "2025-12-01",
            "Lab Komputer Gedung Informatika",
            "24 jam non-stop coding competition untuk solusi smart campus",
            &["teknologi", "programming", "kompetisi", "AI"],
            "https://bit.ly/hackathon-uns",
            60,
            "Rp 100.000/tim",
        ),
        event(
            7,
            "Pelatihan Public Speaking & Leadership",
            "Seminar",
            "BEM Universitas UNS",
            "2025-11-08",
            "Student Center UNS",
            "Workshop meningkatkan kemampuan berbicara di depan umum dan kepemimpinan",
            &["soft-skill", "leadership", "komunikasi"],
            "https://bit.ly/public-speaking-uns",
            80,
            "Gratis",
        ),
        event(
            8,
            "Bakti Sosial & Donor Darah",
            "Volunteering",
            "PMI & KSR UNS",
            "2025-11-03",
            "Lapangan Parkir UNS",
            "Kegiatan donor darah dan bakti sosial untuk masyarakat sekitar kampus",
            &["sosial", "kesehatan", "volunteer"],
            "https://bit.ly/donor-darah-uns",
            150,
            "Gratis",
        ),
        event(
            9,
            "Rekrutmen UKM Teater Kampus",
            "UKM",
            "UKM Teater Sakata UNS",
            "2025-11-02",
            "Gedung Kesenian UNS",
            "Open recruitment untuk anggota baru yang tertarik seni teater",
            &["seni", "teater", "organisasi", "kreatif"],
            "https://bit.ly/teater-uns",
            25,
            "Gratis",
        ),
        event(
            10,
            "Lomba Karya Tulis Ilmiah Nasional",
            "Lomba",
            "FMIPA UNS",
            "2025-11-25",
            "Online",
            "Kompetisi penulisan karya ilmiah dengan tema Sains & Teknologi",
            &["akademik", "penelitian", "kompetisi"],
            "https://bit.ly/kti-nasional",
            200,
            "Rp 75.000/tim",
        ),
    ]
}
