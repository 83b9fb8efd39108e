use crate::{Address, Company, Geo, User};

type Row = (
    &'static str, // name
    &'static str, // username
    &'static str, // email
    [&'static str; 4], // street, suite, city, zipcode
    [&'static str; 2], // lat, lng
    &'static str, // phone
    &'static str, // website
    [&'static str; 3], // company name, catch phrase, bs
);

const ROWS: [Row; 10] = [
    (
        "Leanne Graham",
        "Bret",
        "Sincere@april.biz",
        ["Kulas Light", "Apt. 556", "Gwenborough", "92998-3874"],
        ["-37.3159", "81.1496"],
        "1-770-736-8031 x56442",
        "hildegard.org",
        ["Romaguera-Crona", "Multi-layered client-server neural-net", "harness real-time e-markets"],
    ),
    (
        "Ervin Howell",
        "Antonette",
        "Shanna@melissa.tv",
        ["Victor Plains", "Suite 879", "Wisokyburgh", "90566-7771"],
        ["-43.9509", "-34.4618"],
        "010-692-6593 x09125",
        "anastasia.net",
        ["Deckow-Crist", "Proactive didactic contingency", "synergize scalable supply-chains"],
    ),
    (
        "Clementine Bauch",
        "Samantha",
        "Nathan@yesenia.net",
        ["Douglas Extension", "Suite 847", "McKenziehaven", "59590-4157"],
        ["-68.6102", "-47.0653"],
        "1-463-123-4447",
        "ramiro.info",
        ["Romaguera-Jacobson", "Face to face bifurcated interface", "e-enable strategic applications"],
    ),
    (
        "Patricia Lebsack",
        "Karianne",
        "Julianne.OConner@kory.org",
        ["Hoeger Mall", "Apt. 692", "South Elvis", "53919-4257"],
        ["29.4572", "-164.2990"],
        "493-170-9623 x156",
        "kale.biz",
        ["Robel-Corkery", "Multi-tiered zero tolerance productivity", "transition cutting-edge web services"],
    ),
    (
        "Chelsey Dietrich",
        "Kamren",
        "Lucio_Hettinger@annie.ca",
        ["Skiles Walks", "Suite 351", "Roscoeview", "33263"],
        ["-31.8129", "62.5342"],
        "(254)954-1289",
        "demarco.info",
        ["Keebler LLC", "User-centric fault-tolerant solution", "revolutionize end-to-end systems"],
    ),
    (
        "Mrs. Dennis Schulist",
        "Leopoldo_Corkery",
        "Karley_Dach@jasper.info",
        ["Norberto Crossing", "Apt. 950", "South Christy", "23505-1337"],
        ["-71.4197", "71.7478"],
        "1-477-935-8478 x6430",
        "ola.org",
        ["Considine-Lockman", "Synchronised bottom-line interface", "e-enable innovative applications"],
    ),
    (
        "Kurtis Weissnat",
        "Elwyn.Skiles",
        "Telly.Hoeger@billy.biz",
        ["Rex Trail", "Suite 280", "Howemouth", "58804-1099"],
        ["24.8918", "21.8984"],
        "210.067.6132",
        "elvis.io",
        ["Johns Group", "Configurable multimedia task-force", "generate enterprise e-tailers"],
    ),
    (
        "Nicholas Runolfsdottir V",
        "Maxime_Nienow",
        "Sherwood@rosamond.me",
        ["Ellsworth Summit", "Suite 729", "Aliyaview", "45169"],
        ["-14.3990", "-120.7677"],
        "586.493.6943 x140",
        "jacynthe.com",
        ["Abernathy Group", "Implemented secondary concept", "e-enable extensible e-tailers"],
    ),
    (
        "Glenna Reichert",
        "Delphine",
        "Chaim_McDermott@dana.io",
        ["Dayna Park", "Suite 449", "Bartholomebury", "76495-3109"],
        ["24.6463", "-168.8889"],
        "(775)976-6794 x41206",
        "conrad.com",
        ["Yost and Sons", "Switchable contextually-based project", "aggregate real-time technologies"],
    ),
    (
        "Clementina DuBuque",
        "Moriah.Stanton",
        "Rey.Padberg@karina.biz",
        ["Kattie Turnpike", "Suite 198", "Lebsackbury", "31428-2261"],
        ["-38.2386", "57.2232"],
        "024-648-3804",
        "ambrose.net",
        ["Hoeger LLC", "Centralized empowering task-force", "target end-to-end models"],
    ),
];

pub(crate) fn users() -> Vec<User> {
    ROWS.iter()
        .zip(1..)
        .map(|(row, id)| {
            let (name, username, email, address, geo, phone, website, company) = *row;
            let [street, suite, city, zipcode] = address;
            let [lat, lng] = geo;
            let [company_name, catch_phrase, bs] = company;
            User {
                id,
                name: name.to_string(),
                username: username.to_string(),
                email: email.to_string(),
                address: Address {
                    street: street.to_string(),
                    suite: suite.to_string(),
                    city: city.to_string(),
                    zipcode: zipcode.to_string(),
                    geo: Geo {
                        lat: lat.to_string(),
                        lng: lng.to_string(),
                    },
                },
                phone: phone.to_string(),
                website: website.to_string(),
                company: Company {
                    name: company_name.to_string(),
                    catch_phrase: catch_phrase.to_string(),
                    bs: bs.to_string(),
                },
            }
        })
        .collect()
}
