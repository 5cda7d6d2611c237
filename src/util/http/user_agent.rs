use rand::Rng;

const FIREFOX_VERSIONS: [&str; 10] = [
    "133.0", "132.0", "131.0", "130.0", "129.0", "128.0", "127.0", "126.0", "125.0", "124.0",
];

const CHROME_VERSIONS: [&str; 10] = [
    "133.0.6943.50",
    "132.0.6834.83",
    "131.0.6778.85",
    "130.0.6723.92",
    "129.0.6668.70",
    "128.0.6613.120",
    "127.0.6533.88",
    "126.0.6478.126",
    "125.0.6422.141",
    "124.0.6367.201",
];

const EDGE_VERSIONS: [&str; 6] = [
    "133.0.3048.56",
    "132.0.2957.55",
    "131.0.2903.86",
    "130.0.2849.68",
    "129.0.2792.52",
    "128.0.2739.79",
];

const OS_STRINGS: [&str; 8] = [
    "Windows NT 10.0; Win64; x64",
    "Windows NT 10.0; Win64; x64",
    "Windows NT 10.0; Win64; x64",
    "Macintosh; Intel Mac OS X 10_15_7",
    "Macintosh; Intel Mac OS X 14_7_1",
    "X11; Linux x86_64",
    "X11; Ubuntu; Linux x86_64",
    "X11; Fedora; Linux x86_64",
];

fn gen_firefox_ua() -> String {
    let mut rng = rand::rng();
    let version = FIREFOX_VERSIONS[rng.random_range(0..FIREFOX_VERSIONS.len())];
    let os = OS_STRINGS[rng.random_range(0..OS_STRINGS.len())];

    format!(
        "Mozilla/5.0 ({}; rv:{}) Gecko/20100101 Firefox/{}",
        os, version, version
    )
}

fn gen_chrome_ua() -> String {
    let mut rng = rand::rng();
    let version = CHROME_VERSIONS[rng.random_range(0..CHROME_VERSIONS.len())];
    let os = OS_STRINGS[rng.random_range(0..OS_STRINGS.len())];

    format!(
        "Mozilla/5.0 ({}) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/{} Safari/537.36",
        os, version
    )
}

fn gen_edge_ua() -> String {
    let mut rng = rand::rng();
    let version = EDGE_VERSIONS[rng.random_range(0..EDGE_VERSIONS.len())];
    let os = OS_STRINGS[rng.random_range(0..OS_STRINGS.len())];
    let chrome_ver = version.split('.').next().unwrap_or("133");

    format!(
        "Mozilla/5.0 ({}) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/{}.0.0.0 Safari/537.36 Edg/{}",
        os, chrome_ver, version
    )
}

/// Picks a realistic desktop browser user agent; the upstream host rejects
/// requests that do not look like a browser.
pub fn gen_random_ua() -> String {
    let mut rng = rand::rng();
    match rng.random_range(0..10) {
        0..=5 => gen_chrome_ua(),
        6..=7 => gen_firefox_ua(),
        8 => gen_edge_ua(),
        _ => gen_chrome_ua(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ua_formats() {
        for _ in 0..100 {
            let ua = gen_random_ua();
            assert!(
                ua.starts_with("Mozilla/5.0"),
                "UA should start with Mozilla/5.0: {}",
                ua
            );
            assert!(ua.len() > 50, "UA should be reasonably long: {}", ua);
        }
    }
}
