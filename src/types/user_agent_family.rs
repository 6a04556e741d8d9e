family_enum! {
    /// Client and robot families known to the classifier.
    UserAgentFamily {
        AhrefsBot => "AhrefsBot",
        AndroidWebkit => "Android Webkit",
        ApacheHttpClient => "Apache-HttpClient",
        Arora => "Arora",
        Baiduspider => "Baiduspider",
        Bingbot => "bingbot",
        Camino => "Camino",
        Chrome => "Chrome",
        ChromeMobile => "Chrome Mobile",
        Chromium => "Chromium",
        Curl => "cURL",
        Dolphin => "Dolphin",
        DuckDuckBot => "DuckDuckBot",
        Epiphany => "Epiphany",
        Exabot => "Exabot",
        FacebookExternalHit => "facebookexternalhit",
        FeedfetcherGoogle => "Feedfetcher-Google",
        Firefox => "Firefox",
        Flock => "Flock",
        Googlebot => "Googlebot",
        GooglebotMobile => "Googlebot-Mobile",
        IaArchiver => "ia_archiver",
        Iceweasel => "Iceweasel",
        Ie => "IE",
        IeMobile => "IE Mobile",
        Java => "Java",
        KMeleon => "K-Meleon",
        Konqueror => "Konqueror",
        LibwwwPerl => "libwww-perl",
        Links => "Links",
        LotusNotes => "Lotus Notes",
        Lynx => "Lynx",
        Maxthon => "Maxthon",
        Midori => "Midori",
        MobileFirefox => "Mobile Firefox",
        MobileSafari => "Mobile Safari",
        Mozilla => "Mozilla",
        Msnbot => "msnbot",
        NetscapeNavigator => "Netscape Navigator",
        Opera => "Opera",
        OperaMini => "Opera Mini",
        OperaMobile => "Opera Mobile",
        Outlook => "Outlook",
        Php => "PHP",
        PythonUrllib => "Python-urllib",
        Safari => "Safari",
        SeaMonkey => "SeaMonkey",
        Silk => "Silk",
        SogouSpider => "Sogou spider",
        Thunderbird => "Thunderbird",
        Twitterbot => "Twitterbot",
        W3 => "w3m",
        W3cValidator => "W3C Validator",
        Wget => "Wget",
        YahooSlurp => "Yahoo! Slurp",
        YandexBot => "YandexBot",
    }
}
