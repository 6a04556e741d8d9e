family_enum! {
    /// Operating-system families known to the classifier.
    OperatingSystemFamily {
        Aix => "AIX",
        AmigaOs => "AmigaOS",
        Android => "Android",
        Aros => "AROS",
        Bada => "Bada",
        BeOs => "BeOS",
        BlackBerryOs => "BlackBerry OS",
        Brew => "Brew",
        Bsd => "BSD",
        ChromeOs => "Chrome OS",
        DangerHiptop => "Danger Hiptop",
        GnuOs => "GNU OS",
        Haiku => "Haiku",
        InfernoOs => "Inferno OS",
        Ios => "iOS",
        Irix => "IRIX",
        Jvm => "JVM (Platform Micro Edition)",
        Linux => "Linux",
        MacOs => "Mac OS",
        MacOsX => "Mac OS X",
        MeeGo => "MeeGo",
        Minix => "MINIX",
        MorphOs => "MorphOS",
        MtkNucleusOs => "MTK/Nucleus OS",
        Os2 => "OS/2",
        OsX => "OS X",
        PalmOs => "Palm OS",
        Qnx => "QNX",
        RiscOs => "RISC OS",
        Solaris => "Solaris",
        Syllable => "Syllable",
        Symbian => "Symbian OS",
        WebOs => "webOS",
        Windows => "Windows",
        XrossMediaBar => "XrossMediaBar (XMB)",
    }
}
