//! The bundled resource library.
//!
//! Shipped with the client so the resources page renders content even
//! when the store is unreachable. The mirror swaps these out for live
//! rows as soon as a fetch succeeds.

use pelagos_core::resource::{ResourceCategory, ResourceRecord};

#[allow(clippy::too_many_arguments)]
fn record(
  id: &str,
  title: &str,
  category: ResourceCategory,
  excerpt: &str,
  author: &str,
  image_url: &str,
  read_time: &str,
  date: &str,
  featured: bool,
) -> ResourceRecord {
  ResourceRecord {
    id: id.to_string(),
    title: title.to_string(),
    category,
    excerpt: excerpt.to_string(),
    author: author.to_string(),
    image_url: image_url.to_string(),
    read_time: read_time.to_string(),
    date: date.to_string(),
    featured,
  }
}

/// The static library bundled with the client.
pub fn bundled_resources() -> Vec<ResourceRecord> {
  use ResourceCategory::*;
  vec![
    record(
      "1",
      "New Migration Patterns Discovered in Blue Whales",
      Research,
      "Researchers have identified previously unknown migration routes for \
       blue whales in the Pacific Ocean, providing new insights into their \
       behavior and adaptation to changing ocean conditions.",
      "Dr. Emily Chen",
      "https://www.oceanactionhub.org/storage/2023/10/blue-whale-mother-and-calf-.jpg",
      "8 min read",
      "May 2, 2025",
      true,
    ),
    record(
      "2",
      "Ocean Acidification Effects on Coral Reefs",
      Research,
      "A comprehensive study reveals the accelerating impact of ocean \
       acidification on coral reef ecosystems worldwide, with concerning \
       implications for marine biodiversity.",
      "Prof. James Wilson",
      "https://encrypted-tbn0.gstatic.com/images?q=tbn:ANd9GcQLsNFfZLR9Bt9sZSoRwy0VotL7DOILKXbohVnIyEh1m7pWDO_eG3IMpeDu6TldO5Kak_8&usqp=CAU",
      "12 min read",
      "April 28, 2025",
      false,
    ),
    record(
      "3",
      "Deep Sea Exploration Yields New Species",
      Discovery,
      "Marine biologists have identified 12 new species during a deep-sea \
       expedition in the Mariana Trench, highlighting how much remains \
       unknown about our ocean depths.",
      "Dr. Sarah Johnson",
      "https://encrypted-tbn0.gstatic.com/images?q=tbn:ANd9GcQk9U9uikL-Q3VO09skqxYq8e8DihVdRZ1mwQ&s",
      "10 min read",
      "April 15, 2025",
      false,
    ),
    record(
      "4",
      "Marine Protected Areas Show Positive Results",
      Conservation,
      "A 10-year study of marine protected areas shows significant recovery \
       of fish populations and ecosystem health, providing evidence for \
       expanded conservation efforts.",
      "Maria Rodriguez",
      "https://www.scuba.com/blog/wp-content/uploads/2020/04/shutterstock_295429772-825x465.jpg",
      "7 min read",
      "May 5, 2025",
      true,
    ),
    record(
      "5",
      "International Agreement on Plastic Pollution",
      Conservation,
      "World leaders have signed a landmark agreement to reduce plastic \
       waste entering the oceans by 80% by 2030, marking a significant step \
       in marine conservation.",
      "Thomas Lee",
      "https://www.reusethisbag.com/wp-content/uploads/2021/08/ocean-pollution-plastics.jpg.webp",
      "9 min read",
      "April 22, 2025",
      false,
    ),
    record(
      "6",
      "Community-Led Conservation Success Story",
      Conservation,
      "Local communities in coastal regions have successfully implemented \
       sustainable fishing practices, leading to marine ecosystem recovery \
       and improved livelihoods.",
      "Aisha Patel",
      "https://www.greenpeace.org/static/planet4-malaysia-stateless/2024/06/2a90d588-gp0stzng2-1024x683.jpg",
      "6 min read",
      "April 10, 2025",
      false,
    ),
    record(
      "7",
      "Rare Megamouth Shark Sighted",
      Discovery,
      "Scientists have documented a rare sighting of the elusive megamouth \
       shark off the coast of Japan, providing valuable data about this \
       mysterious deep-sea species.",
      "Dr. Kenji Tanaka",
      "https://encrypted-tbn0.gstatic.com/images?q=tbn:ANd9GcS4TB0usukysz82fPIPpOI16hhaaF0XqItZDw&s",
      "5 min read",
      "May 7, 2025",
      false,
    ),
    record(
      "8",
      "New Coral Reef Discovered in Deep Waters",
      Discovery,
      "Researchers have found a previously unknown coral reef system \
       thriving at unusual depths in the Indian Ocean, challenging our \
       understanding of coral ecosystems.",
      "Dr. Amara Singh",
      "https://t4.ftcdn.net/jpg/02/78/12/73/360_F_278127372_mWGRfu0XaAaJbrGCCo4b4WHLaXU4U3p7.jpg",
      "8 min read",
      "April 25, 2025",
      false,
    ),
    record(
      "9",
      "Ancient Shipwreck Reveals Marine Ecosystem",
      Discovery,
      "A 400-year-old shipwreck has become a thriving artificial reef, \
       hosting dozens of marine species and providing insights into \
       ecosystem development.",
      "Marco Rossi",
      "https://cdn.mos.cms.futurecdn.net/v2/t:0,l:0,cw:1920,ch:1080,q:80,w:1920/yGRJauEXsS9Qfe9FaFWW76.jpg",
      "7 min read",
      "April 18, 2025",
      false,
    ),
    record(
      "10",
      "Climate Change Impact on Marine Mammals",
      Research,
      "New research documents how climate change is affecting marine mammal \
       populations worldwide, with particular focus on Arctic species and \
       their changing habitats.",
      "Dr. Lisa Nordstrom",
      "https://encrypted-tbn0.gstatic.com/images?q=tbn:ANd9GcQFbnzC-9yVmDF-dBcfwT2TJlN4N2lZWXGYug&s",
      "11 min read",
      "May 1, 2025",
      false,
    ),
    record(
      "11",
      "Innovative Technologies for Ocean Cleanup",
      Conservation,
      "Engineers have developed new autonomous systems for removing plastic \
       waste from oceans, with pilot programs showing promising results in \
       heavily polluted areas.",
      "Michael Zhang",
      "https://i.insider.com/61673f4b38c19600182fbf98?width=700",
      "9 min read",
      "April 20, 2025",
      false,
    ),
    record(
      "12",
      "Marine Biology Education Programs for Schools",
      Education,
      "New curriculum resources are helping K-12 students learn about \
       marine ecosystems and conservation through interactive, hands-on \
       activities.",
      "Emma Thompson",
      "https://encrypted-tbn0.gstatic.com/images?q=tbn:ANd9GcSEhV4am6DUn56Sit6CMtGaaAhSQTzN3NYruw&s",
      "6 min read",
      "April 5, 2025",
      false,
    ),
    record(
      "13",
      "Blue Planet II: The Deep",
      Documentary,
      "An exploration of the deepest parts of our oceans, revealing \
       extraordinary creatures and behaviors never before filmed, narrated \
       by Sir David Attenborough.",
      "BBC Earth",
      "https://encrypted-tbn0.gstatic.com/images?q=tbn:ANd9GcRGHp4H4zbdLNjgSC8GIbYKm08KXATB6PEgLQ&s",
      "58 min watch",
      "March 15, 2025",
      true,
    ),
    record(
      "14",
      "Chasing Coral: The Vanishing Reefs",
      Documentary,
      "A team of divers, photographers, and scientists set out on an ocean \
       adventure to discover why coral reefs are disappearing at an \
       unprecedented rate.",
      "Exposure Labs",
      "https://resizing.flixster.com/ORuQChAss6Uf0iz_GS7gsXuSNlU=/fit-in/705x460/v2/https://resizing.flixster.com/Tl6FWuz3ycpS2GZsAfd3IucFMeg=/ems.cHJkLWVtcy1hc3NldHMvbW92aWVzLzY4ZjJhYmVhLWU3ODgtNDZkNi1iMWE5LTM0NDgwYTE4MTA4ZC53ZWJw",
      "93 min watch",
      "March 10, 2025",
      false,
    ),
    record(
      "15",
      "Mission Blue: Hope Spots",
      Documentary,
      "Dr. Sylvia Earle's mission to create a global network of marine \
       protected areas, called 'Hope Spots,' to safeguard the health of our \
       oceans.",
      "Netflix Originals",
      "https://encrypted-tbn0.gstatic.com/images?q=tbn:ANd9GcS-JnGBDN3rbbxFITe7fe3vqH5S4NCOcm4E7EQYTwYN6XYhSyDNLoGuacTcU_9HBWOxpzE&usqp=CAU",
      "95 min watch",
      "February 28, 2025",
      false,
    ),
    record(
      "16",
      "Seaspiracy: Fishing Industry Exposed",
      Documentary,
      "An investigation into the environmental impact of industrial fishing \
       and the human rights abuses in the fishing industry worldwide.",
      "Ali Tabrizi",
      "https://encrypted-tbn0.gstatic.com/images?q=tbn:ANd9GcRkS5WLUungqhVosuWQQZCRUTzgOuh0N0Xp0g&s",
      "89 min watch",
      "February 15, 2025",
      false,
    ),
    record(
      "17",
      "My Octopus Teacher",
      Documentary,
      "A filmmaker forges an unusual friendship with an octopus living in a \
       South African kelp forest, learning as the animal shares the \
       mysteries of her world.",
      "Craig Foster",
      "https://images.theconversation.com/files/443875/original/file-20220201-25-lb03xa.jpg",
      "85 min watch",
      "January 25, 2025",
      false,
    ),
    record(
      "18",
      "A Plastic Ocean: The Truth About Pollution",
      Documentary,
      "An adventure documentary that brings to light the consequences of \
       our global disposable lifestyle, revealing the causes and solutions \
       for plastic pollution.",
      "Plastic Oceans Foundation",
      "https://encrypted-tbn0.gstatic.com/images?q=tbn:ANd9GcR5vyNchNCvTxnkyruD0nEhnAobqI8eRGx4eg&s",
      "102 min watch",
      "January 10, 2025",
      false,
    ),
    record(
      "19",
      "Acoustic Monitoring of Whale Populations",
      Research,
      "New acoustic monitoring technologies are revolutionizing how \
       scientists track and study whale populations, providing non-invasive \
       methods for conservation research.",
      "Dr. Carlos Mendez",
      "https://encrypted-tbn0.gstatic.com/images?q=tbn:ANd9GcS3AumXQzQzyxCWRIHafPuesKkIfwy90tw4pg&s",
      "14 min read",
      "May 10, 2025",
      false,
    ),
    record(
      "20",
      "Microplastics in Marine Food Webs",
      Research,
      "A comprehensive study on how microplastics enter and move through \
       marine food webs, with implications for both wildlife and human \
       health.",
      "Dr. Hannah Kim",
      "https://www.digicomply.com/hubfs/Microplastics.jpg",
      "15 min read",
      "April 30, 2025",
      false,
    ),
    record(
      "21",
      "Seagrass Restoration Projects Worldwide",
      Conservation,
      "An overview of successful seagrass meadow restoration projects that \
       are helping to rebuild critical marine habitats and sequester \
       carbon.",
      "Dr. Robert Green",
      "https://encrypted-tbn0.gstatic.com/images?q=tbn:ANd9GcSj5n6ABwBJFHM1dgW0dxpJnNT4nvv7o2noAQ&s",
      "8 min read",
      "March 25, 2025",
      false,
    ),
    record(
      "22",
      "Indigenous Knowledge in Marine Conservation",
      Conservation,
      "How traditional ecological knowledge from indigenous communities is \
       being integrated with scientific approaches to enhance marine \
       conservation efforts.",
      "Maya Williams",
      "https://images.theconversation.com/files/404958/original/file-20210607-134455-5eowi7.jpg",
      "11 min read",
      "March 20, 2025",
      false,
    ),
    record(
      "23",
      "Virtual Reality Ocean Exploration for Classrooms",
      Education,
      "New VR technologies are bringing ocean exploration into classrooms, \
       allowing students to experience marine environments without leaving \
       school.",
      "Community Science Initiative",
      "https://www.marinebiodiversity.ca/wp-content/uploads/2025/05/virtual-marine-biology-classroom.jpg",
      "9 min read",
      "February 5, 2025",
      false,
    ),
  ]
}
